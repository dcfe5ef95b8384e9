//! Color themes.
//!
//! A theme assigns one [`TextStyle`] to every [`StyleClass`] plus a shared
//! background. Two built-in palettes are provided, for dark and light
//! terminal backgrounds; embedders can build or deserialize their own.

use std::fmt;

use friendly_highlight::StyleClass;
use serde::{Deserialize, Serialize};

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` color.
    pub fn from_hex(text: &str) -> Result<Self, ThemeError> {
        let hex = text
            .strip_prefix('#')
            .ok_or_else(|| ThemeError::invalid_color(text))?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ThemeError::invalid_color(text));
        }
        let parse = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ThemeError::invalid_color(text))
        };
        Ok(Self {
            r: parse(0..2)?,
            g: parse(2..4)?,
            b: parse(4..6)?,
        })
    }

    /// Format as `#rrggbb`.
    #[must_use]
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Nearest entry in the xterm 256-color table (color cube or gray ramp).
    #[must_use]
    pub fn ansi256(&self) -> u8 {
        if self.r == self.g && self.g == self.b {
            // Gray ramp: 24 steps from 8 to 238.
            if self.r < 8 {
                return 16;
            }
            if self.r > 238 {
                return 231;
            }
            return 232 + (u16::from(self.r) - 8).div_euclid(10) as u8;
        }
        let scale = |v: u8| (u16::from(v) * 5 / 255) as u8;
        16 + 36 * scale(self.r) + 6 * scale(self.g) + scale(self.b)
    }
}

/// Invalid theme data, e.g. a malformed color string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeError {
    message: String,
}

impl ThemeError {
    fn invalid_color(text: &str) -> Self {
        Self {
            message: format!("invalid color {text:?}; colors must be of the form #dddddd"),
        }
    }
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ThemeError {}

/// Resolved style for one fragment class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    pub color: Rgb,
    /// Explicit background; `None` means the theme background applies.
    pub background: Option<Rgb>,
    pub bold: bool,
    pub italic: bool,
}

impl TextStyle {
    #[must_use]
    pub const fn fg(color: Rgb) -> Self {
        Self {
            color,
            background: None,
            bold: false,
            italic: false,
        }
    }

    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    #[must_use]
    pub const fn on(mut self, background: Rgb) -> Self {
        self.background = Some(background);
        self
    }
}

/// A complete palette: one style per fragment class plus the background.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub background: Rgb,
    pub keyword: TextStyle,
    pub constant: TextStyle,
    pub builtin: TextStyle,
    pub exception: TextStyle,
    pub comment: TextStyle,
    pub number: TextStyle,
    pub operator: TextStyle,
    pub string: TextStyle,
    pub plain: TextStyle,
    /// Overrides everything else under a caret highlight.
    pub error: TextStyle,
}

impl Theme {
    /// Palette for dark terminal backgrounds.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            name: "friendly-dark".to_string(),
            background: Rgb::new(0x2b, 0x2b, 0x2b),
            keyword: TextStyle::fg(Rgb::new(0xff, 0x9d, 0x00)).bold(),
            constant: TextStyle::fg(Rgb::new(0xff, 0x62, 0x8c)).bold(),
            builtin: TextStyle::fg(Rgb::new(0x80, 0xff, 0xbb)),
            exception: TextStyle::fg(Rgb::new(0xff, 0x53, 0x53)).bold(),
            comment: TextStyle::fg(Rgb::new(0x80, 0x80, 0x80)).italic(),
            number: TextStyle::fg(Rgb::new(0xa5, 0xd6, 0xff)),
            operator: TextStyle::fg(Rgb::new(0xff, 0xff, 0xff)),
            string: TextStyle::fg(Rgb::new(0xa8, 0xff, 0x60)),
            plain: TextStyle::fg(Rgb::new(0xe6, 0xe1, 0xdc)),
            error: TextStyle::fg(Rgb::new(0xff, 0xff, 0xff))
                .bold()
                .on(Rgb::new(0xb8, 0x1e, 0x1e)),
        }
    }

    /// Palette for light terminal backgrounds.
    #[must_use]
    pub fn light() -> Self {
        Self {
            name: "friendly-light".to_string(),
            background: Rgb::new(0xfa, 0xfa, 0xfa),
            keyword: TextStyle::fg(Rgb::new(0x00, 0x55, 0xaa)).bold(),
            constant: TextStyle::fg(Rgb::new(0xaa, 0x00, 0x55)).bold(),
            builtin: TextStyle::fg(Rgb::new(0x00, 0x66, 0x33)),
            exception: TextStyle::fg(Rgb::new(0xcc, 0x00, 0x00)).bold(),
            comment: TextStyle::fg(Rgb::new(0x70, 0x70, 0x70)).italic(),
            number: TextStyle::fg(Rgb::new(0x00, 0x33, 0x99)),
            operator: TextStyle::fg(Rgb::new(0x33, 0x33, 0x33)),
            string: TextStyle::fg(Rgb::new(0x44, 0x77, 0x00)),
            plain: TextStyle::fg(Rgb::new(0x1c, 0x1c, 0x1c)),
            error: TextStyle::fg(Rgb::new(0xff, 0xff, 0xff))
                .bold()
                .on(Rgb::new(0xcc, 0x00, 0x00)),
        }
    }

    /// Style for a fragment class.
    #[must_use]
    pub fn style(&self, class: StyleClass) -> &TextStyle {
        match class {
            StyleClass::Keyword => &self.keyword,
            StyleClass::Constant => &self.constant,
            StyleClass::Builtin => &self.builtin,
            StyleClass::Exception => &self.exception,
            StyleClass::Comment => &self.comment,
            StyleClass::Number => &self.number,
            StyleClass::Operator => &self.operator,
            StyleClass::String => &self.string,
            StyleClass::Plain => &self.plain,
            StyleClass::Error => &self.error,
        }
    }

    /// Same palette over a different background.
    #[must_use]
    pub fn with_background(mut self, background: Rgb) -> Self {
        self.background = background;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let color = Rgb::from_hex("#1a2b3c").unwrap();
        assert_eq!(color, Rgb::new(0x1a, 0x2b, 0x3c));
        assert_eq!(color.hex(), "#1a2b3c");
    }

    #[test]
    fn test_invalid_hex_rejected() {
        assert!(Rgb::from_hex("1a2b3c").is_err());
        assert!(Rgb::from_hex("#12345").is_err());
        assert!(Rgb::from_hex("#12345g").is_err());
        assert!(Rgb::from_hex("#1234567").is_err());
        let err = Rgb::from_hex("red").unwrap_err();
        assert!(err.to_string().contains("#dddddd"));
    }

    #[test]
    fn test_ansi256_extremes() {
        assert_eq!(Rgb::new(0, 0, 0).ansi256(), 16);
        assert_eq!(Rgb::new(255, 255, 255).ansi256(), 231);
        assert_eq!(Rgb::new(255, 0, 0).ansi256(), 196);
    }

    #[test]
    fn test_ansi256_gray_ramp() {
        let code = Rgb::new(128, 128, 128).ansi256();
        assert!((232..=255).contains(&code));
    }

    #[test]
    fn test_theme_styles_per_class() {
        let theme = Theme::dark();
        assert!(theme.style(StyleClass::Keyword).bold);
        assert!(theme.style(StyleClass::Comment).italic);
        assert!(theme.style(StyleClass::Error).background.is_some());
    }

    #[test]
    fn test_background_override() {
        let background = Rgb::from_hex("#000000").unwrap();
        let theme = Theme::light().with_background(background);
        assert_eq!(theme.background, background);
        // Palette itself is untouched.
        assert_eq!(theme.keyword, Theme::light().keyword);
    }

    #[test]
    fn test_theme_serde_round_trip() {
        let theme = Theme::dark();
        let json = serde_json::to_string(&theme).unwrap();
        let back: Theme = serde_json::from_str(&json).unwrap();
        assert_eq!(back, theme);
    }
}
