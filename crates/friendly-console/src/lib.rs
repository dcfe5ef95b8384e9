#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub mod config;
pub mod console;
pub mod context;
pub mod detection;
pub mod render;
pub mod report;
pub mod testing;
pub mod theme;

pub use config::{ConsoleConfig, ThemeChoice};
pub use console::FriendlyConsole;
pub use context::RenderContext;
pub use detection::{DisplayContext, is_plain_context, should_enable_rich};
pub use render::{AnsiRenderer, FragmentRenderer, HtmlRenderer, MarkdownRenderer, PlainRenderer};
pub use report::{MarkdownOptions, Report, Section};
pub use theme::{Rgb, TextStyle, Theme, ThemeError};

// The colorizing pipeline lives next door; re-export the entry points so
// most embedders need a single dependency.
pub use friendly_highlight::{ExcerptColorizer, StyleClass, StyledFragment};
