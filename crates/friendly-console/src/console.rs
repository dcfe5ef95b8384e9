//! Configured console wrapper.
//!
//! [`FriendlyConsole`] ties the pipeline together: it owns a writer, a
//! [`RenderContext`] and a rich/plain flag, and prints excerpts through the
//! colorizer and the matching renderer.

use std::io::{self, Write};
use std::sync::Mutex;

use friendly_highlight::ExcerptColorizer;

use crate::config::ConsoleConfig;
use crate::context::RenderContext;
use crate::render::{AnsiRenderer, FragmentRenderer, PlainRenderer};

/// Console for styled excerpt output to stderr (or a custom writer).
pub struct FriendlyConsole {
    writer: Mutex<Box<dyn Write + Send>>,
    ctx: RenderContext,
    enabled: bool,
    colorizer: ExcerptColorizer,
}

impl FriendlyConsole {
    /// Create from a configuration, writing to stderr.
    #[must_use]
    pub fn new(config: &ConsoleConfig) -> Self {
        Self::build(Box::new(io::stderr()), config.render_context(), config.should_use_rich())
    }

    /// Create with automatic detection and the default configuration.
    #[must_use]
    pub fn detect() -> Self {
        Self::new(&ConsoleConfig::from_env())
    }

    /// Create with a custom writer (for testing).
    #[must_use]
    pub fn with_writer<W: Write + Send + 'static>(
        writer: W,
        ctx: RenderContext,
        enabled: bool,
    ) -> Self {
        Self::build(Box::new(writer), ctx, enabled)
    }

    fn build(writer: Box<dyn Write + Send>, ctx: RenderContext, enabled: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            ctx,
            enabled,
            colorizer: ExcerptColorizer::new(),
        }
    }

    // ─────────────────────────────────────────────────
    // State Queries
    // ─────────────────────────────────────────────────

    /// Whether styled output is enabled.
    #[must_use]
    pub fn is_rich(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn context(&self) -> &RenderContext {
        &self.ctx
    }

    // ─────────────────────────────────────────────────
    // Output Methods
    // ─────────────────────────────────────────────────

    /// Print a source excerpt (with optional caret marker lines), colorized
    /// when rich output is enabled and verbatim otherwise.
    pub fn print_excerpt(&self, text: &str) {
        let lines = self.colorizer.colorize(text);
        let rendered = if self.enabled {
            AnsiRenderer::forced().render_block(&lines, &self.ctx)
        } else {
            PlainRenderer::new().render_block(&lines, &self.ctx)
        };
        self.write_line(&rendered);
    }

    /// Print plain text, never styled.
    pub fn print_plain(&self, text: &str) {
        self.write_line(text);
    }

    /// Print a blank line.
    pub fn newline(&self) {
        self.write_line("");
    }

    fn write_line(&self, text: &str) {
        if let Ok(mut writer) = self.writer.lock() {
            if let Err(err) = writeln!(writer, "{text}") {
                log::warn!("console write failed: {err}");
            }
        }
    }
}

impl std::fmt::Debug for FriendlyConsole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FriendlyConsole")
            .field("enabled", &self.enabled)
            .field("theme", &self.ctx.theme().name)
            .finish_non_exhaustive()
    }
}
