//! Token types and the tokenizer seam.
//!
//! The colorizer does not parse source itself; it consumes a token stream
//! with row/column spans and lexical predicates. [`Tokenizer`] is the seam
//! through which a host supplies that stream; [`crate::python`] provides
//! the default implementation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Zero-based row/column position within a source block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    /// Character offset within the row (not bytes)
    pub col: usize,
}

impl Position {
    #[must_use]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Keyword,
    Name,
    Number,
    Operator,
    Str,
    /// A string literal that runs past the end of the input
    UnclosedStr,
    Comment,
}

/// A token with its text span.
///
/// `text` contains the characters exactly as they appear in the source,
/// including quotes and, for multi-row literals, embedded newlines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub start: Position,
    pub end: Position,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, start: Position, end: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            start,
            end,
        }
    }

    pub fn is_keyword(&self) -> bool {
        self.kind == TokenKind::Keyword
    }

    pub fn is_comment(&self) -> bool {
        self.kind == TokenKind::Comment
    }

    pub fn is_number(&self) -> bool {
        self.kind == TokenKind::Number
    }

    pub fn is_operator(&self) -> bool {
        self.kind == TokenKind::Operator
    }

    pub fn is_string(&self) -> bool {
        self.kind == TokenKind::Str
    }

    pub fn is_unclosed_string(&self) -> bool {
        self.kind == TokenKind::UnclosedStr
    }

    /// True for literals spanning more than one row (triple-quoted strings).
    pub fn spans_rows(&self) -> bool {
        self.start.row != self.end.row
    }
}

/// Failure to tokenize a source fragment.
///
/// Excerpts are often partial or synthetic, so callers recover from this
/// locally (plain rendering) rather than propagating it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizeError {
    pub row: usize,
    pub col: usize,
    pub message: String,
}

impl TokenizeError {
    #[must_use]
    pub fn new(row: usize, col: usize, message: impl Into<String>) -> Self {
        Self {
            row,
            col,
            message: message.into(),
        }
    }
}

impl fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tokenize error at {}:{}: {}",
            self.row, self.col, self.message
        )
    }
}

impl std::error::Error for TokenizeError {}

/// Source tokenization seam.
pub trait Tokenizer {
    /// Tokenize `source`, which may span multiple rows.
    ///
    /// Whitespace is not reported; the colorizer reconstructs gaps from
    /// column positions.
    fn tokenize(&self, source: &str) -> Result<Vec<Token>, TokenizeError>;
}
