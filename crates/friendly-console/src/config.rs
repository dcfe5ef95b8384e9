//! Centralized configuration for console output.
//!
//! `ConsoleConfig` is the single point of configuration for styled output,
//! supporting both programmatic and environment variable-based setup. It
//! resolves to an immutable [`RenderContext`] handed to render calls.

use std::env;

use crate::context::RenderContext;
use crate::detection::DisplayContext;
use crate::theme::{Rgb, Theme};

/// Theme selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeChoice {
    /// Palette for dark terminal backgrounds
    #[default]
    Dark,
    /// Palette for light terminal backgrounds
    Light,
}

/// Configuration for console output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Override display context (`None` = auto-detect)
    pub context: Option<DisplayContext>,
    /// Force styled output even in non-TTY
    pub force_color: Option<bool>,
    /// Force plain text mode (no styling)
    pub force_plain: bool,
    /// Which built-in palette to use
    pub theme: ThemeChoice,
    /// Override the theme background
    pub background: Option<Rgb>,
    /// Output width in columns
    pub width: Option<usize>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            context: None,
            force_color: None,
            force_plain: false,
            theme: ThemeChoice::Dark,
            background: None,
            width: None,
        }
    }
}

impl ConsoleConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create config from environment variables.
    ///
    /// # Environment Variables
    ///
    /// | Variable | Values | Description |
    /// |----------|--------|-------------|
    /// | `FRIENDLY_FORCE_COLOR` | (set) | Force styled output |
    /// | `FRIENDLY_PLAIN` | (set) | Force plain output |
    /// | `NO_COLOR` | (set) | Disable colors (standard) |
    /// | `FRIENDLY_THEME` | dark/light | Palette selection |
    /// | `FRIENDLY_BACKGROUND` | `#rrggbb` | Background override |
    /// | `FRIENDLY_WIDTH` | columns | Output width |
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if env::var_os("FRIENDLY_FORCE_COLOR").is_some() {
            config.force_color = Some(true);
        }
        if env::var_os("FRIENDLY_PLAIN").is_some() || env::var_os("NO_COLOR").is_some() {
            config.force_plain = true;
        }

        if let Ok(value) = env::var("FRIENDLY_THEME") {
            config.theme = match value.to_lowercase().as_str() {
                "light" => ThemeChoice::Light,
                // "dark" and any other value default to Dark
                _ => ThemeChoice::Dark,
            };
        }

        if let Ok(value) = env::var("FRIENDLY_BACKGROUND") {
            match Rgb::from_hex(&value) {
                Ok(color) => config.background = Some(color),
                Err(err) => log::warn!("FRIENDLY_BACKGROUND ignored: {err}"),
            }
        }

        if let Ok(value) = env::var("FRIENDLY_WIDTH") {
            match value.parse::<usize>() {
                Ok(width) if width > 0 => config.width = Some(width),
                _ => log::warn!("FRIENDLY_WIDTH ignored: {value:?} is not a positive integer"),
            }
        }

        config
    }

    // ─────────────────────────────────────────────────
    // Builder Methods
    // ─────────────────────────────────────────────────

    /// Select a built-in palette.
    #[must_use]
    pub fn with_theme(mut self, theme: ThemeChoice) -> Self {
        self.theme = theme;
        self
    }

    /// Force styled output.
    #[must_use]
    pub fn force_color(mut self, force: bool) -> Self {
        self.force_color = Some(force);
        self
    }

    /// Enable plain text mode (no styling).
    #[must_use]
    pub fn plain_mode(mut self) -> Self {
        self.force_plain = true;
        self
    }

    /// Override the theme background.
    #[must_use]
    pub fn with_background(mut self, background: Rgb) -> Self {
        self.background = Some(background);
        self
    }

    /// Set the output width.
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the display context explicitly.
    #[must_use]
    pub fn with_context(mut self, context: DisplayContext) -> Self {
        self.context = Some(context);
        self
    }

    // ─────────────────────────────────────────────────
    // Resolution Methods
    // ─────────────────────────────────────────────────

    /// Resolve the display context based on config and environment.
    #[must_use]
    pub fn resolve_context(&self) -> DisplayContext {
        if self.force_plain {
            return DisplayContext::new_plain();
        }
        if let Some(true) = self.force_color {
            return DisplayContext::new_rich();
        }
        self.context.unwrap_or_else(DisplayContext::detect)
    }

    /// Whether styled output should be used.
    #[must_use]
    pub fn should_use_rich(&self) -> bool {
        self.resolve_context().is_rich()
    }

    /// Build the render context this configuration describes.
    #[must_use]
    pub fn render_context(&self) -> RenderContext {
        let theme = match self.theme {
            ThemeChoice::Dark => Theme::dark(),
            ThemeChoice::Light => Theme::light(),
        };
        let mut ctx = RenderContext::new(theme);
        if let Some(background) = self.background {
            ctx = ctx.with_background(background);
        }
        if let Some(width) = self.width {
            ctx = ctx.with_width(width);
        }
        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConsoleConfig::new();
        assert_eq!(config.theme, ThemeChoice::Dark);
        assert!(!config.force_plain);
        assert!(config.width.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = ConsoleConfig::new()
            .with_theme(ThemeChoice::Light)
            .with_width(100)
            .with_background(Rgb::new(0, 0, 0));
        assert_eq!(config.theme, ThemeChoice::Light);
        assert_eq!(config.width, Some(100));
        assert_eq!(config.background, Some(Rgb::new(0, 0, 0)));
    }

    #[test]
    fn test_plain_mode_wins() {
        let config = ConsoleConfig::new().plain_mode().force_color(true);
        assert_eq!(config.resolve_context(), DisplayContext::Plain);
        assert!(!config.should_use_rich());
    }

    #[test]
    fn test_force_color() {
        let config = ConsoleConfig::new().force_color(true);
        assert_eq!(config.resolve_context(), DisplayContext::Rich);
    }

    #[test]
    fn test_explicit_context_respected() {
        let config = ConsoleConfig::new().with_context(DisplayContext::Plain);
        assert_eq!(config.resolve_context(), DisplayContext::Plain);
    }

    #[test]
    fn test_render_context_carries_overrides() {
        let config = ConsoleConfig::new()
            .with_theme(ThemeChoice::Light)
            .with_background(Rgb::new(1, 2, 3))
            .with_width(120);
        let ctx = config.render_context();
        assert_eq!(ctx.theme().name, "friendly-light");
        assert_eq!(ctx.theme().background, Rgb::new(1, 2, 3));
        assert_eq!(ctx.width(), 120);
    }
}
