//! Re-colouring of source excerpts into styled fragments.
//!
//! [`colorize_line`] walks one line's tokens against its highlight
//! segments; [`ExcerptColorizer`] runs the whole pipeline for a block:
//! margin splitting, marker-line removal, multi-line string detection,
//! per-line colorizing, and the plain fallback when tokenization fails.
//!
//! Nothing in this module returns an error to the caller: malformed input
//! degrades to plainer styling, never to a crash or lost output.

use crate::fragment::{StyleClass, StyledFragment};
use crate::names;
use crate::python::PythonTokenizer;
use crate::ranges::{self, Segment, highlighted_spans};
use crate::token::{Position, Token, Tokenizer};

/// Style class a token gets when it is not covered by a highlight.
#[must_use]
pub fn style_class(token: &Token) -> StyleClass {
    let text = token.text.trim();
    if token.is_keyword() {
        if matches!(text, "True" | "False" | "None") {
            StyleClass::Constant
        } else {
            StyleClass::Keyword
        }
    } else if names::is_python_builtin(text) {
        StyleClass::Builtin
    } else if names::is_python_exception(text) {
        StyleClass::Exception
    } else if token.is_comment() {
        StyleClass::Comment
    } else if token.is_number() {
        StyleClass::Number
    } else if token.is_operator() {
        StyleClass::Operator
    } else if token.is_string() || token.is_unclosed_string() {
        StyleClass::String
    } else {
        StyleClass::Plain
    }
}

/// Colorize one source line.
///
/// `segments` is the line's alternating segment list (empty when the line
/// has no marker); `tokens` must come from tokenizing exactly `line`, so
/// every token sits on row zero. Concatenating the returned fragment texts
/// reproduces `line`.
#[must_use]
pub fn colorize_line(line: &str, segments: &[Segment], tokens: &[Token]) -> Vec<StyledFragment> {
    let line_len = line.chars().count();
    let spans = highlighted_spans(segments);
    let mut out = Vec::new();
    let mut end_prev = 0usize;

    for token in tokens {
        if token.text.is_empty() {
            continue;
        }
        let tstart = token.start.col;
        let tend = token.end.col;
        let mut matched = false;
        for &(hb, he) in &spans {
            if hb <= tstart && tstart < he {
                // Token starts inside the highlight: the whole token is part
                // of the error, as is any gap from the highlight start.
                if hb > end_prev {
                    out.push(StyledFragment::spaces(hb - end_prev));
                    end_prev = hb;
                }
                let pad = tstart - end_prev;
                out.push(StyledFragment::new(
                    format!("{}{}", " ".repeat(pad), token.text),
                    StyleClass::Error,
                ));
                matched = true;
                break;
            }
            if tstart < hb && hb < tend {
                // Highlight boundary inside the token, e.g. carets under the
                // escaped quote of 'don\'t'. Split into lexical prefix,
                // error middle, lexical suffix.
                if tstart > end_prev {
                    out.push(StyledFragment::spaces(tstart - end_prev));
                }
                let style = style_class(token);
                let chars: Vec<char> = token.text.chars().collect();
                let cut1 = hb - tstart;
                let cut2 = (he.min(tend) - tstart).min(chars.len());
                out.push(StyledFragment::new(
                    chars[..cut1].iter().collect::<String>(),
                    style,
                ));
                out.push(StyledFragment::new(
                    chars[cut1..cut2].iter().collect::<String>(),
                    StyleClass::Error,
                ));
                if cut2 < chars.len() {
                    out.push(StyledFragment::new(
                        chars[cut2..].iter().collect::<String>(),
                        style,
                    ));
                }
                matched = true;
                break;
            }
        }
        if !matched {
            if tstart > end_prev {
                out.push(StyledFragment::spaces(tstart - end_prev));
            }
            out.push(StyledFragment::new(token.text.clone(), style_class(token)));
        }
        end_prev = tend;
    }

    if end_prev < line_len {
        let trailing: String = line.chars().skip(end_prev).collect();
        out.extend(overlay_fragments(&trailing, end_prev, StyleClass::Plain, &spans));
    }
    out
}

/// Plain rendering driven directly by the segments: the fallback when a
/// line cannot be tokenized. Still honors highlights and round-trips.
#[must_use]
pub fn plain_fragments(line: &str, segments: &[Segment]) -> Vec<StyledFragment> {
    overlay_fragments(line, 0, StyleClass::Plain, &highlighted_spans(segments))
}

/// Slice `text` (occupying columns `offset..`) into `base`/error fragments
/// along the highlighted spans.
fn overlay_fragments(
    text: &str,
    offset: usize,
    base: StyleClass,
    spans: &[(usize, usize)],
) -> Vec<StyledFragment> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = Vec::new();
    let mut cursor = 0usize;
    while cursor < chars.len() {
        let col = offset + cursor;
        if let Some(&(_, he)) = spans.iter().find(|&&(hb, he)| hb <= col && col < he) {
            let end = (he - offset).min(chars.len());
            out.push(StyledFragment::new(
                chars[cursor..end].iter().collect::<String>(),
                StyleClass::Error,
            ));
            cursor = end;
        } else {
            let next = spans
                .iter()
                .map(|&(hb, _)| hb)
                .filter(|&hb| hb > col)
                .min()
                .map_or(chars.len(), |hb| (hb - offset).min(chars.len()));
            out.push(StyledFragment::new(
                chars[cursor..next].iter().collect::<String>(),
                base,
            ));
            cursor = next;
        }
    }
    out
}

/// A literal spanning several rows of the marker-free block.
#[derive(Debug, Clone, Copy)]
struct MultilineSpan {
    start: Position,
    end: Position,
}

/// Block-level colorizer.
///
/// Takes a whole excerpt (source lines, optional caret marker lines,
/// optional `N|` line-number margins) and produces one fragment list per
/// surviving line.
#[derive(Debug, Clone)]
pub struct ExcerptColorizer<T: Tokenizer = PythonTokenizer> {
    tokenizer: T,
}

impl ExcerptColorizer<PythonTokenizer> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tokenizer: PythonTokenizer::new(),
        }
    }
}

impl Default for ExcerptColorizer<PythonTokenizer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Tokenizer> ExcerptColorizer<T> {
    /// Use a caller-supplied tokenizer instead of the default.
    #[must_use]
    pub fn with_tokenizer(tokenizer: T) -> Self {
        Self { tokenizer }
    }

    /// Colorize a block of text; lines are split on `\n`.
    #[must_use]
    pub fn colorize(&self, text: &str) -> Vec<Vec<StyledFragment>> {
        let lines: Vec<&str> = text.lines().collect();
        self.colorize_lines(&lines)
    }

    /// Colorize an excerpt given as individual lines.
    ///
    /// Marker lines are consumed (they annotate, and are not part of the
    /// output); every other input line yields one fragment list whose
    /// concatenated text equals that line.
    #[must_use]
    pub fn colorize_lines(&self, lines: &[&str]) -> Vec<Vec<StyledFragment>> {
        let ranges_map = ranges::highlight_ranges(lines.iter().copied());
        let margin_width = detect_margin(lines);

        struct Entry {
            margin: String,
            code: String,
            segments: Vec<Segment>,
        }

        let mut entries: Vec<Entry> = Vec::new();
        for (index, line) in lines.iter().enumerate() {
            if ranges::is_marker_line(line) {
                continue;
            }
            let (margin, code) = split_margin(line, margin_width);
            let segments = ranges_map
                .get(&index)
                .map(|segments| shift_segments(segments, margin_width))
                .unwrap_or_default();
            entries.push(Entry {
                margin,
                code,
                segments,
            });
        }

        let code_lines: Vec<&str> = entries.iter().map(|e| e.code.as_str()).collect();
        let spans = self.find_multiline_spans(&code_lines);

        let mut out = Vec::with_capacity(entries.len());
        for (row, entry) in entries.iter().enumerate() {
            let mut fragments = margin_fragments(&entry.margin);

            if spans
                .iter()
                .any(|span| span.start.row < row && row < span.end.row)
            {
                // Interior of a multi-line literal: never re-tokenized.
                fragments.extend(overlay_fragments(
                    &entry.code,
                    0,
                    StyleClass::String,
                    &highlighted_spans(&entry.segments),
                ));
                out.push(fragments);
                continue;
            }

            let mut code = entry.code.clone();
            let mut segments = entry.segments.clone();
            if let Some(span) = spans
                .iter()
                .find(|span| span.end.row == row && span.start.row < row)
            {
                // Closing line: the literal's tail is a string fragment; the
                // rest of the line is colorized normally.
                let cut = span.end.col.min(code.chars().count());
                if cut > 0 {
                    let prefix: String = code.chars().take(cut).collect();
                    fragments.push(StyledFragment::new(prefix, StyleClass::String));
                    code = code.chars().skip(cut).collect();
                    segments = shift_segments(&segments, cut);
                }
            }

            match self.tokenizer.tokenize(&code) {
                Ok(tokens) => fragments.extend(colorize_line(&code, &segments, &tokens)),
                Err(err) => {
                    log::debug!("tokenization failed ({err}); rendering line plainly");
                    fragments.extend(plain_fragments(&code, &segments));
                }
            }
            out.push(fragments);
        }
        out
    }

    fn find_multiline_spans(&self, code_lines: &[&str]) -> Vec<MultilineSpan> {
        let source = code_lines.join("\n");
        match self.tokenizer.tokenize(&source) {
            Ok(tokens) => tokens
                .iter()
                .filter(|token| token.spans_rows())
                .map(|token| MultilineSpan {
                    start: token.start,
                    end: token.end,
                })
                .collect(),
            Err(err) => {
                log::debug!("block tokenization failed ({err}); multi-line literals not excluded");
                Vec::new()
            }
        }
    }
}

/// Width of the `N|` line-number margin, or zero when the block has none.
///
/// A margin is only recognized when every line carries a `|` (marker lines
/// and `:` continuation lines are exempt); its width comes from the first
/// line that has one.
fn detect_margin(lines: &[&str]) -> usize {
    let mut width = 0usize;
    for line in lines {
        if ranges::is_marker_line(line) || line.trim() == ":" {
            continue;
        }
        match line.find('|') {
            Some(pos) => {
                if width == 0 {
                    width = line[..pos].chars().count() + 1;
                }
            }
            None => return 0,
        }
    }
    width
}

fn split_margin(line: &str, width: usize) -> (String, String) {
    if width == 0 {
        return (String::new(), (*line).to_string());
    }
    let margin: String = line.chars().take(width).collect();
    let code: String = line.chars().skip(width).collect();
    (margin, code)
}

/// Shift segment columns left after the margin (or a literal prefix) has
/// been sliced off the front of a line.
fn shift_segments(segments: &[Segment], by: usize) -> Vec<Segment> {
    segments
        .iter()
        .map(|seg| Segment::new(seg.start.saturating_sub(by), seg.end.saturating_sub(by), seg.highlighted))
        .collect()
}

/// Style the line-number margin. `-->` marks the erroring line and keeps
/// its arrow; ordinary margins read as commentary.
fn margin_fragments(margin: &str) -> Vec<StyledFragment> {
    if margin.is_empty() {
        return Vec::new();
    }
    if let Some(pos) = margin.find("-->") {
        let mut fragments = vec![StyledFragment::new(
            &margin[..pos + 3],
            StyleClass::Operator,
        )];
        if pos + 3 < margin.len() {
            fragments.push(StyledFragment::new(&margin[pos + 3..], StyleClass::Number));
        }
        fragments
    } else {
        vec![StyledFragment::new(margin, StyleClass::Comment)]
    }
}
