//! Markdown rendering.
//!
//! Markdown has no inline color, so excerpts are emitted as fenced code
//! blocks; the language tag lets downstream viewers re-highlight them.

use friendly_highlight::{StyledFragment, line_text};

use crate::context::RenderContext;
use crate::render::FragmentRenderer;

/// Renders fragment blocks as fenced markdown code.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    language: String,
}

impl MarkdownRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: "python".to_string(),
        }
    }

    /// Use a different fence language tag.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl FragmentRenderer for MarkdownRenderer {
    fn render_line(&self, fragments: &[StyledFragment], _ctx: &RenderContext) -> String {
        line_text(fragments)
    }

    fn render_block(&self, lines: &[Vec<StyledFragment>], ctx: &RenderContext) -> String {
        let body = lines
            .iter()
            .map(|fragments| self.render_line(fragments, ctx))
            .collect::<Vec<_>>()
            .join("\n");
        format!("```{}\n{}\n```", self.language, body)
    }
}
