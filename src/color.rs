//! 24-bit RGB stitch colors.
//!
//! Colors travel through the editor as `#RRGGBB` strings (that is how the pattern
//! and the user palette are persisted), but are held internally as three bytes so
//! that `#ff0000` and `#FF0000` compare equal.

use palette::Srgb;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ColorParseError;

/// A stitch color. Serialized as an uppercase `#RRGGBB` string.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    rgb: [u8; 3],
}

impl HexColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { rgb: [r, g, b] }
    }

    /// Parse a 6-hex-digit color, with or without a leading `#`.
    ///
    /// Shorthand (`#F00`), alpha (`#FF000080`), surrounding whitespace and named
    /// colors are rejected.
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidFormat(input.to_string()));
        }

        let srgb: Srgb<u8> = digits
            .parse()
            .map_err(|_| ColorParseError::InvalidFormat(input.to_string()))?;
        Ok(Self::from(srgb))
    }

    pub fn rgb(&self) -> [u8; 3] {
        self.rgb
    }

    /// Squared Euclidean distance in RGB space.
    pub fn distance_squared(&self, other: &HexColor) -> u32 {
        self.rgb
            .iter()
            .zip(other.rgb.iter())
            .map(|(a, b)| {
                let d = *a as i32 - *b as i32;
                (d * d) as u32
            })
            .sum()
    }

    pub fn distance(&self, other: &HexColor) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }

    /// Canonical `#RRGGBB` form.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.rgb[0], self.rgb[1], self.rgb[2])
    }
}

impl From<Srgb<u8>> for HexColor {
    fn from(color: Srgb<u8>) -> Self {
        Self::new(color.red, color.green, color.blue)
    }
}

impl FromStr for HexColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
