#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub mod colorize;
pub mod fragment;
pub mod names;
pub mod python;
pub mod ranges;
pub mod token;

pub use colorize::{ExcerptColorizer, colorize_line, plain_fragments, style_class};
pub use fragment::{StyleClass, StyledFragment, line_text};
pub use python::PythonTokenizer;
pub use ranges::{LineHighlights, Segment, highlight_ranges, highlighted_spans, is_marker_line};
pub use token::{Position, Token, TokenKind, TokenizeError, Tokenizer};
