//! Style-free rendering.

use friendly_highlight::{StyledFragment, line_text};

use crate::context::RenderContext;
use crate::render::FragmentRenderer;

/// Drops all styling and emits the bare text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl PlainRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FragmentRenderer for PlainRenderer {
    fn render_line(&self, fragments: &[StyledFragment], _ctx: &RenderContext) -> String {
        line_text(fragments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use friendly_highlight::StyleClass;

    #[test]
    fn test_plain_render_is_raw_text() {
        let fragments = vec![
            StyledFragment::new("x = ", StyleClass::Plain),
            StyledFragment::new("1", StyleClass::Error),
        ];
        let ctx = RenderContext::dark();
        assert_eq!(PlainRenderer::new().render_line(&fragments, &ctx), "x = 1");
    }
}
