//! Hex color parsing.

use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// An RGBA color, written as `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Error returned for malformed color strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color '{0}': expected #rgb, #rgba, #rrggbb or #rrggbbaa")]
pub struct ParseColorError(String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }

        let digits: Vec<u8> = match hex.len() {
            // Short form: each digit is doubled, "8" -> 0x88
            3 | 4 => hex
                .chars()
                .filter_map(|c| c.to_digit(16))
                .map(|d| (d * 17) as u8)
                .collect(),
            6 | 8 => (0..hex.len())
                .step_by(2)
                .map(|i| u8::from_str_radix(&hex[i..i + 2], 16))
                .collect::<Result<_, _>>()
                .map_err(|_| err())?,
            _ => return Err(err()),
        };

        Ok(Color {
            r: digits[0],
            g: digits[1],
            b: digits[2],
            a: digits.get(3).copied().unwrap_or(255),
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_form() {
        assert_eq!("#888".parse::<Color>().unwrap(), Color::rgb(0x88, 0x88, 0x88));
        assert_eq!("#000".parse::<Color>().unwrap(), Color::rgb(0, 0, 0));
    }

    #[test]
    fn test_parse_long_form_with_alpha() {
        let c: Color = "#ff8000cc".parse().unwrap();
        assert_eq!(c.to_rgba(), [0xff, 0x80, 0x00, 0xcc]);
    }

    #[test]
    fn test_parse_short_alpha() {
        let c: Color = "#fff0".parse().unwrap();
        assert_eq!(c.to_rgba(), [255, 255, 255, 0]);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("888".parse::<Color>().is_err());
        assert!("#88".parse::<Color>().is_err());
        assert!("#ggg".parse::<Color>().is_err());
        assert!("#é12".parse::<Color>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        assert_eq!(Color::rgb(0x88, 0x88, 0x88).to_string(), "#888888");
        assert_eq!("#12345678".parse::<Color>().unwrap().to_string(), "#12345678");
    }
}
