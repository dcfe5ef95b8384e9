//! ANSI terminal rendering via the `console` crate.

use console::{Color, Style};
use friendly_highlight::StyledFragment;

use crate::context::RenderContext;
use crate::render::FragmentRenderer;
use crate::theme::TextStyle;

/// Renders fragments with 256-color ANSI escapes.
///
/// `console` suppresses styling when the target is not a terminal; capture
/// tests and piped output that should stay colored use [`Self::forced`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiRenderer {
    force_styling: bool,
}

impl AnsiRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            force_styling: false,
        }
    }

    /// Emit escape codes even when stdout/stderr is not a terminal.
    #[must_use]
    pub fn forced() -> Self {
        Self {
            force_styling: true,
        }
    }

    fn style_for(&self, text_style: &TextStyle) -> Style {
        let mut style = Style::new().fg(Color::Color256(text_style.color.ansi256()));
        if let Some(background) = text_style.background {
            style = style.bg(Color::Color256(background.ansi256()));
        }
        if text_style.bold {
            style = style.bold();
        }
        if text_style.italic {
            style = style.italic();
        }
        if self.force_styling {
            style = style.force_styling(true);
        }
        style
    }
}

impl FragmentRenderer for AnsiRenderer {
    fn render_line(&self, fragments: &[StyledFragment], ctx: &RenderContext) -> String {
        fragments
            .iter()
            .filter(|fragment| !fragment.is_empty())
            .map(|fragment| {
                let style = self.style_for(&ctx.style(fragment.style));
                style.apply_to(fragment.text.as_str()).to_string()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use friendly_highlight::StyleClass;

    #[test]
    fn test_forced_styling_emits_escapes() {
        let fragments = vec![StyledFragment::new("boom", StyleClass::Error)];
        let ctx = RenderContext::dark();
        let rendered = AnsiRenderer::forced().render_line(&fragments, &ctx);
        assert!(rendered.contains("boom"));
        assert!(rendered.contains('\u{1b}'));
    }

    #[test]
    fn test_text_survives_stripping() {
        let fragments = vec![
            StyledFragment::new("x = ", StyleClass::Plain),
            StyledFragment::new("1 / 0", StyleClass::Error),
        ];
        let ctx = RenderContext::dark();
        let rendered = AnsiRenderer::forced().render_line(&fragments, &ctx);
        let stripped = strip_ansi_escapes::strip(rendered.as_bytes());
        assert_eq!(String::from_utf8_lossy(&stripped), "x = 1 / 0");
    }

    #[test]
    fn test_block_joins_with_newlines() {
        let lines = vec![
            vec![StyledFragment::new("a", StyleClass::Plain)],
            vec![StyledFragment::new("b", StyleClass::Plain)],
        ];
        let ctx = RenderContext::dark();
        let rendered = AnsiRenderer::forced().render_block(&lines, &ctx);
        assert_eq!(rendered.matches('\n').count(), 1);
    }
}
