//! Caret-range extraction.
//!
//! Traceback excerpts underline the implicated part of a source line with a
//! marker line of `^` characters placed immediately below it:
//!
//! ```text
//! result = 1 / 0
//!          ^^^^^
//! ```
//!
//! [`highlight_ranges`] scans an excerpt and, for each annotated source
//! line, breaks its columns into alternating not-highlighted/highlighted
//! segments. Marker lines may also carry `-` and `>` (continuation
//! decorations such as `-->`); those never start or end a highlight.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A half-open column interval on a source line.
///
/// Segments for a line alternate between not-highlighted and highlighted,
/// starting with a not-highlighted segment (possibly empty), and together
/// cover the line with no gaps or overlaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// First column (character offset, inclusive)
    pub start: usize,
    /// One past the last column (exclusive)
    pub end: usize,
    /// Whether this span must be rendered in the error style
    pub highlighted: bool,
}

impl Segment {
    #[must_use]
    pub fn new(start: usize, end: usize, highlighted: bool) -> Self {
        Self {
            start,
            end,
            highlighted,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Map from source-line index to that line's segments.
///
/// Keys are indices into the raw excerpt (the line above each marker line).
/// Only annotated lines appear.
pub type LineHighlights = BTreeMap<usize, Vec<Segment>>;

/// Classify a line as a caret marker line.
///
/// A marker line contains only spaces and `^`, `-`, `>` characters, with at
/// least one `^`. A line of only dashes and arrows is *not* a marker line;
/// requiring a caret guards against matching unrelated punctuation-only
/// lines.
#[must_use]
pub fn is_marker_line(line: &str) -> bool {
    let mut saw_caret = false;
    let mut saw_any = false;
    for ch in line.chars() {
        match ch {
            ' ' | '\t' => {}
            '^' => {
                saw_caret = true;
                saw_any = true;
            }
            '-' | '>' => saw_any = true,
            _ => return false,
        }
    }
    saw_any && saw_caret
}

/// Extract highlight segments from an excerpt that may contain marker lines.
///
/// Each marker line annotates the line directly above it; the returned map
/// is keyed by that source line's index in `lines`. A marker line at the
/// start of the excerpt, or directly after another marker line, has nothing
/// to annotate and is skipped.
pub fn highlight_ranges<'a, I>(lines: I) -> LineHighlights
where
    I: IntoIterator<Item = &'a str>,
{
    let mut map = LineHighlights::new();
    let mut prev: Option<&str> = None;
    for (index, line) in lines.into_iter().enumerate() {
        if is_marker_line(line) {
            match prev {
                Some(source) if !is_marker_line(source) => {
                    map.insert(index - 1, scan_marker(line, source.chars().count()));
                }
                _ => {
                    log::warn!("caret marker line at index {index} has no source line; skipped");
                }
            }
        }
        prev = Some(line);
    }
    map
}

/// Walk one marker line and emit alternating segments.
///
/// `-` and `>` are treated as spaces; the line is right-trimmed and then
/// padded with spaces to the source line's length so a trailing highlight
/// reaching end-of-line is captured even when the marker line is shorter.
fn scan_marker(marker: &str, source_len: usize) -> Vec<Segment> {
    let mut normalized: String = marker
        .chars()
        .map(|ch| if ch == '^' { '^' } else { ' ' })
        .collect();
    // All-ASCII after normalization, so byte length equals column count.
    normalized.truncate(normalized.trim_end().len());
    let total = normalized.len().max(source_len);
    while normalized.len() < total {
        normalized.push(' ');
    }

    let mut segments = Vec::new();
    let mut begin = 0usize;
    let mut inside = false;
    for (index, ch) in normalized.chars().enumerate() {
        let caret = ch == '^';
        if caret != inside {
            // The leading segment may be empty when carets start at column 0.
            segments.push(Segment::new(begin, index, inside));
            begin = index;
            inside = caret;
        }
    }
    segments.push(Segment::new(begin, total, inside));
    segments
}

/// Highlighted column intervals of a segment list, in column order.
#[must_use]
pub fn highlighted_spans(segments: &[Segment]) -> Vec<(usize, usize)> {
    segments
        .iter()
        .filter(|seg| seg.highlighted && !seg.is_empty())
        .map(|seg| (seg.start, seg.end))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_line_requires_caret() {
        assert!(is_marker_line("  ^^^"));
        assert!(is_marker_line("-->  ^^"));
        assert!(!is_marker_line("------"));
        assert!(!is_marker_line("  --> "));
        assert!(!is_marker_line(""));
        assert!(!is_marker_line("   "));
        assert!(!is_marker_line("  ^^ x"));
    }

    #[test]
    fn test_single_caret_run() {
        let lines = ["result = 1 / 0", "         ^^^^^"];
        let map = highlight_ranges(lines);
        assert_eq!(map.len(), 1);
        let segments = &map[&0];
        assert_eq!(
            segments,
            &vec![Segment::new(0, 9, false), Segment::new(9, 14, true)]
        );
    }

    #[test]
    fn test_caret_run_at_column_zero_has_empty_lead() {
        let lines = ["a + b", "^"];
        let segments = &highlight_ranges(lines)[&0];
        assert_eq!(segments[0], Segment::new(0, 0, false));
        assert_eq!(segments[1], Segment::new(0, 1, true));
        // Padded out to the source line length.
        assert_eq!(segments[2], Segment::new(1, 5, false));
    }

    #[test]
    fn test_multiple_caret_runs() {
        //                       0123456789
        let lines = ["a + b + c", "^^      ^"];
        let segments = &highlight_ranges(lines)[&0];
        assert_eq!(
            segments,
            &vec![
                Segment::new(0, 0, false),
                Segment::new(0, 2, true),
                Segment::new(2, 8, false),
                Segment::new(8, 9, true),
            ]
        );
    }

    #[test]
    fn test_arrows_and_dashes_are_decoration() {
        let lines = ["if x == y:", "-->   ^^"];
        let segments = &highlight_ranges(lines)[&0];
        assert_eq!(
            segments,
            &vec![
                Segment::new(0, 6, false),
                Segment::new(6, 8, true),
                Segment::new(8, 10, false),
            ]
        );
    }

    #[test]
    fn test_segments_alternate_and_cover_line() {
        let lines = ["total = price * count", "        ^^^^^   ^^^^^"];
        let segments = &highlight_ranges(lines)[&0];
        let mut expect_highlight = false;
        let mut cursor = 0;
        for (i, seg) in segments.iter().enumerate() {
            assert_eq!(seg.start, cursor, "gap before segment {i}");
            assert!(seg.end >= seg.start);
            assert_eq!(seg.highlighted, expect_highlight);
            cursor = seg.end;
            expect_highlight = !expect_highlight;
        }
        assert_eq!(cursor, "total = price * count".len());
    }

    #[test]
    fn test_marker_on_first_line_is_skipped() {
        let lines = ["  ^^^", "x = 1"];
        assert!(highlight_ranges(lines).is_empty());
    }

    #[test]
    fn test_consecutive_marker_lines_skip_second() {
        let lines = ["x = 1", "^^^^^", "  ^^^"];
        let map = highlight_ranges(lines);
        assert_eq!(map.len(), 1);
        assert!(map.contains_key(&0));
    }

    #[test]
    fn test_clean_input_yields_empty_map() {
        let lines = ["x = 1", "y = 2"];
        assert!(highlight_ranges(lines).is_empty());
    }

    #[test]
    fn test_marker_longer_than_source() {
        // Carets can overshoot a short source line; coverage simply extends.
        let lines = ["ab", "^^^^"];
        let segments = &highlight_ranges(lines)[&0];
        assert_eq!(
            segments,
            &vec![Segment::new(0, 0, false), Segment::new(0, 4, true)]
        );
    }

    #[test]
    fn test_highlighted_spans_filters_empty() {
        let segments = vec![
            Segment::new(0, 0, false),
            Segment::new(0, 3, true),
            Segment::new(3, 5, false),
        ];
        assert_eq!(highlighted_spans(&segments), vec![(0, 3)]);
    }
}
