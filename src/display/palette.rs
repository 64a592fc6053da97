// Palette - Colors and scaling mode used to paint the CHIP-8 display
//
// On cells are painted with the foreground color, off cells with the
// background color. Colors use the same notation as the display settings
// file: `rgb(0 128 0)`, `rgb(0, 128, 0)`, `#008000` or `#080`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a color string cannot be parsed
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid color {input:?}: {reason}")]
pub struct ColorParseError {
    input: String,
    reason: &'static str,
}

impl ColorParseError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// Opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GREEN: Color = Color::rgb(0, 128, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Color as a 32-bit value: 0xRRGGBB
    #[inline]
    pub fn to_rgb(self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }

    /// Color as [R, G, B, A] bytes expected by the pixels crate
    #[inline]
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xFF]
    }

    fn parse_hex(input: &str, digits: &str) -> Result<Self, ColorParseError> {
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::new(input, "expected hexadecimal digits"));
        }

        let channel = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| ColorParseError::new(input, "bad channel"))
        };

        match digits.len() {
            6 => Ok(Self::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                // #rgb expands each digit: #0f8 == #00ff88
                let r = channel(&digits[0..1])?;
                let g = channel(&digits[1..2])?;
                let b = channel(&digits[2..3])?;
                Ok(Self::rgb(r * 0x11, g * 0x11, b * 0x11))
            }
            _ => Err(ColorParseError::new(input, "expected #rgb or #rrggbb")),
        }
    }

    fn parse_function(input: &str, args: &str) -> Result<Self, ColorParseError> {
        let channels: Vec<&str> = args
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();

        let [r, g, b] = channels.as_slice() else {
            return Err(ColorParseError::new(input, "expected three channels"));
        };

        let channel = |s: &str| {
            s.parse::<u8>()
                .map_err(|_| ColorParseError::new(input, "channels must be integers 0-255"))
        };

        Ok(Self::rgb(channel(*r)?, channel(*g)?, channel(*b)?))
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Some(digits) = trimmed.strip_prefix('#') {
            return Self::parse_hex(s, digits);
        }

        if let Some(args) = trimmed
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return Self::parse_function(s, args);
        }

        Err(ColorParseError::new(s, "expected rgb(r g b) or #rrggbb"))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({} {} {})", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Scaling filter applied when the 64×32 surface is magnified
///
/// Only filters that keep hard pixel edges are supported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderingMode {
    /// Nearest-neighbour, integer-scaled (blocky)
    #[default]
    Pixelated,
}

/// Display palette
///
/// Updates take effect on the next clear or draw; nothing is repainted
/// retroactively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Surface scaling filter
    #[serde(alias = "rendering")]
    pub rendering_mode: RenderingMode,
    /// Paint color for off cells
    #[serde(alias = "backgroundColor")]
    pub background_color: Color,
    /// Paint color for on cells
    #[serde(alias = "color")]
    pub foreground_color: Color,
}

impl Palette {
    /// Green on black, pixelated
    pub fn new() -> Self {
        Self {
            rendering_mode: RenderingMode::Pixelated,
            background_color: Color::BLACK,
            foreground_color: Color::GREEN,
        }
    }

    pub fn with_colors(foreground: Color, background: Color) -> Self {
        Self {
            foreground_color: foreground,
            background_color: background,
            ..Self::new()
        }
    }

    /// Paint color for a cell
    #[inline]
    pub fn color_for(&self, on: bool) -> Color {
        if on {
            self.foreground_color
        } else {
            self.background_color
        }
    }

    /// Whether on and off cells are distinguishable
    pub fn has_distinct_colors(&self) -> bool {
        self.foreground_color != self.background_color
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb_function() {
        assert_eq!("rgb(0 128 0)".parse::<Color>().unwrap(), Color::GREEN);
        assert_eq!("rgb(0, 0, 0)".parse::<Color>().unwrap(), Color::BLACK);
        assert_eq!(
            "  rgb(12,34 , 56) ".parse::<Color>().unwrap(),
            Color::rgb(12, 34, 56)
        );
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(
            "#123456".parse::<Color>().unwrap(),
            Color::rgb(0x12, 0x34, 0x56)
        );
        assert_eq!(
            "#0f8".parse::<Color>().unwrap(),
            Color::rgb(0x00, 0xFF, 0x88)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("green".parse::<Color>().is_err());
        assert!("rgb(1 2)".parse::<Color>().is_err());
        assert!("rgb(256 0 0)".parse::<Color>().is_err());
        assert!("#12345".parse::<Color>().is_err());
        assert!("#zzzzzz".parse::<Color>().is_err());
    }

    #[test]
    fn test_display_format() {
        assert_eq!(Color::rgb(1, 2, 3).to_string(), "rgb(1 2 3)");
    }

    #[test]
    fn test_color_conversions() {
        let color = Color::rgb(0x12, 0x34, 0x56);
        assert_eq!(color.to_rgb(), 0x123456);
        assert_eq!(color.to_rgba(), [0x12, 0x34, 0x56, 0xFF]);
    }

    #[test]
    fn test_palette_defaults() {
        let palette = Palette::default();
        assert_eq!(palette.rendering_mode, RenderingMode::Pixelated);
        assert_eq!(palette.background_color, Color::BLACK);
        assert_eq!(palette.foreground_color, Color::GREEN);
        assert!(palette.has_distinct_colors());
    }

    #[test]
    fn test_color_for() {
        let palette = Palette::with_colors(Color::WHITE, Color::BLACK);
        assert_eq!(palette.color_for(true), Color::WHITE);
        assert_eq!(palette.color_for(false), Color::BLACK);
    }

    #[test]
    fn test_palette_deserialization_with_aliases() {
        let palette: Palette = toml::from_str(
            r##"
            rendering = "pixelated"
            background_color = "rgb(0 0 0)"
            color = "#ffffff"
            "##,
        )
        .unwrap();

        assert_eq!(palette.foreground_color, Color::WHITE);
        assert_eq!(palette.background_color, Color::BLACK);
    }

    #[test]
    fn test_palette_accepts_settings_file_names() {
        let palette: Palette = toml::from_str(
            r#"
            rendering = "pixelated"
            backgroundColor = "rgb(1 2 3)"
            color = "rgb(0 128 0)"
            "#,
        )
        .unwrap();

        assert_eq!(palette.rendering_mode, RenderingMode::Pixelated);
        assert_eq!(palette.background_color, Color::rgb(1, 2, 3));
        assert_eq!(palette.foreground_color, Color::GREEN);
    }

    #[test]
    fn test_palette_rejects_unknown_rendering_mode() {
        let result: Result<Palette, _> = toml::from_str(r#"rendering_mode = "smooth""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_palette_rejects_bad_color() {
        let result: Result<Palette, _> = toml::from_str(r#"background_color = "purple""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_palette_serializes_colors_as_strings() {
        let toml_str = toml::to_string(&Palette::default()).unwrap();
        assert!(toml_str.contains(r#"foreground_color = "rgb(0 128 0)""#));
        assert!(toml_str.contains(r#"rendering_mode = "pixelated""#));
    }
}
