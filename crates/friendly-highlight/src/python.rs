//! Default [`Tokenizer`] for Python source excerpts.
//!
//! This is a rendering tokenizer, not a compiler front end: it only needs
//! spans and lexical categories good enough to colour an excerpt. It is
//! deliberately forgiving (a malformed number is still a number-shaped
//! token) but reports an error on characters that cannot begin any token,
//! so callers can fall back to plain rendering.

use crate::token::{Position, Token, TokenKind, TokenizeError, Tokenizer};

static KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class", "continue",
    "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if", "import",
    "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while",
    "with", "yield",
];

const OPERATOR_CHARS: &str = "+-*/%=<>!&|^~@,:;.()[]{}\\";

fn is_ident_start(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic()
}

fn is_ident_continue(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

/// Quote prefixes such as `r`, `b`, `f`, `rb` (any case).
fn is_string_prefix(word: &str) -> bool {
    (1..=2).contains(&word.len())
        && word
            .chars()
            .all(|c| matches!(c.to_ascii_lowercase(), 'r' | 'b' | 'u' | 'f'))
}

/// Tokenizer for Python source.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonTokenizer;

impl PythonTokenizer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for PythonTokenizer {
    fn tokenize(&self, source: &str) -> Result<Vec<Token>, TokenizeError> {
        let rows: Vec<Vec<char>> = source.split('\n').map(|line| line.chars().collect()).collect();
        let mut tokens = Vec::new();
        let mut row = 0usize;
        let mut col = 0usize;
        while row < rows.len() {
            if col >= rows[row].len() {
                row += 1;
                col = 0;
                continue;
            }
            let line = &rows[row];
            let ch = line[col];
            if ch == ' ' || ch == '\t' {
                col += 1;
            } else if ch == '#' {
                let text: String = line[col..].iter().collect();
                tokens.push(Token::new(
                    TokenKind::Comment,
                    text,
                    Position::new(row, col),
                    Position::new(row, line.len()),
                ));
                col = line.len();
            } else if is_ident_start(ch) {
                let start = col;
                let mut cursor = col;
                while cursor < line.len() && is_ident_continue(line[cursor]) {
                    cursor += 1;
                }
                let word: String = line[start..cursor].iter().collect();
                if cursor < line.len()
                    && (line[cursor] == '\'' || line[cursor] == '"')
                    && is_string_prefix(&word)
                {
                    let (token, next) = scan_string(&rows, Position::new(row, start), cursor);
                    row = next.row;
                    col = next.col;
                    tokens.push(token);
                } else {
                    let kind = if KEYWORDS.contains(&word.as_str()) {
                        TokenKind::Keyword
                    } else {
                        TokenKind::Name
                    };
                    tokens.push(Token::new(
                        kind,
                        word,
                        Position::new(row, start),
                        Position::new(row, cursor),
                    ));
                    col = cursor;
                }
            } else if ch.is_ascii_digit()
                || (ch == '.' && col + 1 < line.len() && line[col + 1].is_ascii_digit())
            {
                let (token, next_col) = scan_number(line, row, col);
                tokens.push(token);
                col = next_col;
            } else if ch == '\'' || ch == '"' {
                let (token, next) = scan_string(&rows, Position::new(row, col), col);
                row = next.row;
                col = next.col;
                tokens.push(token);
            } else if OPERATOR_CHARS.contains(ch) {
                let start = col;
                let mut cursor = col;
                while cursor < line.len() && OPERATOR_CHARS.contains(line[cursor]) {
                    // Leave a dot that starts a number (`=.5`) for the next token.
                    if line[cursor] == '.'
                        && cursor + 1 < line.len()
                        && line[cursor + 1].is_ascii_digit()
                        && cursor > start
                    {
                        break;
                    }
                    cursor += 1;
                }
                let text: String = line[start..cursor].iter().collect();
                tokens.push(Token::new(
                    TokenKind::Operator,
                    text,
                    Position::new(row, start),
                    Position::new(row, cursor),
                ));
                col = cursor;
            } else {
                return Err(TokenizeError::new(
                    row,
                    col,
                    format!("unexpected character {ch:?}"),
                ));
            }
        }
        Ok(tokens)
    }
}

/// Scan a string literal starting at `token_start` (which may precede the
/// quote by a one- or two-letter prefix). Never fails: a literal that runs
/// past the end of the input becomes an [`TokenKind::UnclosedStr`] token.
fn scan_string(rows: &[Vec<char>], token_start: Position, quote_col: usize) -> (Token, Position) {
    let first = &rows[token_start.row];
    let quote = first[quote_col];
    let triple =
        quote_col + 2 < first.len() && first[quote_col + 1] == quote && first[quote_col + 2] == quote;

    let mut row = token_start.row;
    let mut col = quote_col + if triple { 3 } else { 1 };
    loop {
        let line = &rows[row];
        if col >= line.len() {
            if triple && row + 1 < rows.len() {
                row += 1;
                col = 0;
                continue;
            }
            let end = Position::new(row, line.len());
            return (
                Token::new(
                    TokenKind::UnclosedStr,
                    slice_block(rows, token_start, end),
                    token_start,
                    end,
                ),
                end,
            );
        }
        let ch = line[col];
        if ch == '\\' {
            if col + 1 < line.len() {
                col += 2;
            } else if row + 1 < rows.len() {
                // Backslash-newline continues the literal on the next row.
                row += 1;
                col = 0;
            } else {
                let end = Position::new(row, line.len());
                return (
                    Token::new(
                        TokenKind::UnclosedStr,
                        slice_block(rows, token_start, end),
                        token_start,
                        end,
                    ),
                    end,
                );
            }
        } else if ch == quote {
            if !triple {
                let end = Position::new(row, col + 1);
                return (
                    Token::new(
                        TokenKind::Str,
                        slice_block(rows, token_start, end),
                        token_start,
                        end,
                    ),
                    end,
                );
            }
            if col + 2 < line.len() && line[col + 1] == quote && line[col + 2] == quote {
                let end = Position::new(row, col + 3);
                return (
                    Token::new(
                        TokenKind::Str,
                        slice_block(rows, token_start, end),
                        token_start,
                        end,
                    ),
                    end,
                );
            }
            col += 1;
        } else {
            col += 1;
        }
    }
}

/// Scan a number-shaped token: digits, radix prefixes, underscores, dots,
/// exponents. Forgiving by design; malformed numerics still colour as
/// numbers.
fn scan_number(line: &[char], row: usize, start: usize) -> (Token, usize) {
    let radix_prefix = line[start] == '0'
        && start + 1 < line.len()
        && matches!(line[start + 1], 'x' | 'X' | 'o' | 'O' | 'b' | 'B');
    let mut cursor = start + 1;
    while cursor < line.len() {
        let ch = line[cursor];
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '.' {
            cursor += 1;
        } else if (ch == '+' || ch == '-')
            && !radix_prefix
            && matches!(line[cursor - 1], 'e' | 'E')
        {
            cursor += 1;
        } else {
            break;
        }
    }
    let text: String = line[start..cursor].iter().collect();
    (
        Token::new(
            TokenKind::Number,
            text,
            Position::new(row, start),
            Position::new(row, cursor),
        ),
        cursor,
    )
}

/// Collect the characters between two positions, joining rows with `\n`.
fn slice_block(rows: &[Vec<char>], start: Position, end: Position) -> String {
    if start.row == end.row {
        return rows[start.row][start.col..end.col].iter().collect();
    }
    let mut text: String = rows[start.row][start.col..].iter().collect();
    for row in &rows[start.row + 1..end.row] {
        text.push('\n');
        text.extend(row.iter());
    }
    text.push('\n');
    text.extend(rows[end.row][..end.col].iter());
    text
}
