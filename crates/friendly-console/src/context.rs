//! Explicit render context.
//!
//! Every render call receives an immutable [`RenderContext`] carrying the
//! theme and layout settings. Concurrent renders (several notebook cells,
//! several threads) each hold their own context, so there is no shared
//! mutable "current theme" to race on.

use friendly_highlight::StyleClass;

use crate::theme::{Rgb, TextStyle, Theme};

/// Immutable configuration value passed into render calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    theme: Theme,
    width: usize,
}

impl RenderContext {
    pub const DEFAULT_WIDTH: usize = 80;

    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            width: Self::DEFAULT_WIDTH,
        }
    }

    /// Context with the dark theme and default width.
    #[must_use]
    pub fn dark() -> Self {
        Self::new(Theme::dark())
    }

    /// Context with the light theme and default width.
    #[must_use]
    pub fn light() -> Self {
        Self::new(Theme::light())
    }

    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    /// Replace the theme background, keeping the palette.
    #[must_use]
    pub fn with_background(mut self, background: Rgb) -> Self {
        self.theme = self.theme.with_background(background);
        self
    }

    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Fully resolved style for a fragment class: the theme background is
    /// filled in wherever the class does not bring its own.
    #[must_use]
    pub fn style(&self, class: StyleClass) -> TextStyle {
        let mut style = *self.theme.style(class);
        if style.background.is_none() {
            style.background = Some(self.theme.background);
        }
        style
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_dark() {
        let ctx = RenderContext::default();
        assert_eq!(ctx.theme().name, "friendly-dark");
        assert_eq!(ctx.width(), RenderContext::DEFAULT_WIDTH);
    }

    #[test]
    fn test_style_fills_background() {
        let ctx = RenderContext::dark();
        let style = ctx.style(StyleClass::Keyword);
        assert_eq!(style.background, Some(ctx.theme().background));
        // The error class keeps its own background.
        let error = ctx.style(StyleClass::Error);
        assert_ne!(error.background, Some(ctx.theme().background));
    }

    #[test]
    fn test_background_override_flows_into_styles() {
        let background = Rgb::new(0, 0, 0);
        let ctx = RenderContext::light().with_background(background);
        assert_eq!(ctx.style(StyleClass::Plain).background, Some(background));
    }

    #[test]
    fn test_width_has_floor() {
        let ctx = RenderContext::dark().with_width(0);
        assert_eq!(ctx.width(), 1);
    }
}
