//! Renderer backends for styled fragments.
//!
//! Each backend is an explicit value chosen at construction time; there is
//! no global renderer state to mutate. All backends consume the same
//! fragment lists, so the colorizing pipeline runs once regardless of the
//! output format.

mod ansi;
mod html;
mod markdown;
mod plain;

pub use ansi::AnsiRenderer;
pub use html::HtmlRenderer;
pub use markdown::MarkdownRenderer;
pub use plain::PlainRenderer;

use friendly_highlight::StyledFragment;

use crate::context::RenderContext;

/// Turns colorized fragment lines into output text.
pub trait FragmentRenderer {
    /// Render a single line's fragments.
    fn render_line(&self, fragments: &[StyledFragment], ctx: &RenderContext) -> String;

    /// Render a whole block, one fragment list per line.
    fn render_block(&self, lines: &[Vec<StyledFragment>], ctx: &RenderContext) -> String {
        lines
            .iter()
            .map(|fragments| self.render_line(fragments, ctx))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
