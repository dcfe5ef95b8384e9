//! Styled fragments: the atomic output of re-colouring.

use serde::{Deserialize, Serialize};

/// Semantic style class attached to a fragment of rendered text.
///
/// These are deliberately abstract: a theme maps each class to concrete
/// colors at render time, so the same fragment sequence can feed an ANSI
/// console, an HTML page, or a plain writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleClass {
    /// Language keyword (`if`, `def`, ...)
    Keyword,
    /// Keyword constant (`True`, `False`, `None`)
    Constant,
    /// Known builtin function name
    Builtin,
    /// Known exception name
    Exception,
    /// Comment text
    Comment,
    /// Numeric literal
    Number,
    /// Operator or punctuation
    Operator,
    /// String literal (including unclosed fragments)
    String,
    /// Anything without a more specific class
    Plain,
    /// Text implicated in the error; overrides any lexical class
    Error,
}

/// A unit of output text paired with its style class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledFragment {
    pub text: String,
    pub style: StyleClass,
}

impl StyledFragment {
    #[must_use]
    pub fn new(text: impl Into<String>, style: StyleClass) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Fragment of plain spaces, used to fill gaps the tokenizer skipped
    #[must_use]
    pub fn spaces(count: usize) -> Self {
        Self::new(" ".repeat(count), StyleClass::Plain)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Concatenate the text of a line's fragments, ignoring styles.
///
/// For any colorized line this must reproduce the input line exactly.
#[must_use]
pub fn line_text(fragments: &[StyledFragment]) -> String {
    fragments.iter().map(|f| f.text.as_str()).collect()
}
