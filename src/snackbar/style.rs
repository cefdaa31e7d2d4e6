use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);
    pub const GRAY: Self = Self::rgb(0x80, 0x80, 0x80);
    pub const DARK_GRAY: Self = Self::rgb(0x55, 0x55, 0x55);
    pub const CLEAR: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 0xff {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = String;

    /// Parse `#rrggbb` or `#rrggbbaa`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if !matches!(hex.len(), 6 | 8) || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("expected #rrggbb or #rrggbbaa, got {s:?}"));
        }
        let channel = |at: usize| {
            u8::from_str_radix(&hex[at..at + 2], 16).map_err(|err| format!("{s:?}: {err}"))
        };
        let alpha = if hex.len() == 8 { channel(6)? } else { 0xff };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: alpha,
        })
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Font {
    /// `None` selects the system font.
    pub family: Option<String>,
    pub size: f32,
    pub bold: bool,
}

impl Font {
    #[must_use]
    pub const fn bold_system(size: f32) -> Self {
        Self {
            family: None,
            size,
            bold: true,
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::bold_system(14.0)
    }
}

/// Color and font of a text label.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelStyle {
    pub color: Color,
    pub font: Font,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            font: Font::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Color;
    use std::str::FromStr;

    #[test]
    fn color_parses_hex_with_optional_alpha() {
        assert_eq!(Color::from_str("#555555"), Ok(Color::DARK_GRAY));
        assert_eq!(
            Color::from_str("10203080"),
            Ok(Color {
                r: 0x10,
                g: 0x20,
                b: 0x30,
                a: 0x80
            })
        );
        assert!(Color::from_str("#fff").is_err());
        assert!(Color::from_str("#gggggg").is_err());
    }

    #[test]
    fn color_rejects_signed_channels() {
        assert!(Color::from_str("#+f+f+f").is_err());
        assert!(Color::from_str("-1-1-1").is_err());
    }

    #[test]
    fn color_display_omits_opaque_alpha() {
        assert_eq!(Color::WHITE.to_string(), "#ffffff");
        assert_eq!(Color::CLEAR.to_string(), "#00000000");
    }
}
