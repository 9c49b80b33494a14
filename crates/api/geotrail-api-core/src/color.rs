//! Colors, palettes, and scales.
//!
//! Colors are 8-bit RGB; opacity always travels separately in the style
//! structs. Serialization uses the `#rrggbb` hex form that styles are
//! authored in. The category-10 palette backs the deterministic region
//! assignment; the 7-step color-brewer ramps back ramped feature styles.

use std::fmt;

use hashbrown::HashMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("color '{0}' is not of the form #rgb or #rrggbb")]
    Malformed(String),
}

/// 8-bit RGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb`.
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::Malformed(s.to_string()))?;
        let expand = |h: u8| h << 4 | h;
        let nib = |c: u8| -> Result<u8, ColorParseError> {
            (c as char)
                .to_digit(16)
                .map(|d| d as u8)
                .ok_or_else(|| ColorParseError::Malformed(s.to_string()))
        };
        match hex.len() {
            3 => {
                let b = hex.as_bytes();
                Ok(Self::rgb(
                    expand(nib(b[0])?),
                    expand(nib(b[1])?),
                    expand(nib(b[2])?),
                ))
            }
            6 => {
                let b = hex.as_bytes();
                Ok(Self::rgb(
                    nib(b[0])? << 4 | nib(b[1])?,
                    nib(b[2])? << 4 | nib(b[3])?,
                    nib(b[4])? << 4 | nib(b[5])?,
                ))
            }
            _ => Err(ColorParseError::Malformed(s.to_string())),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// One step darker: every channel scaled by 0.7, the d3 convention.
    pub fn darker(self) -> Self {
        let scale = |c: u8| ((c as f32) * 0.7).round() as u8;
        Self::rgb(scale(self.r), scale(self.g), scale(self.b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).map_err(D::Error::custom)
    }
}

/// The classic 10-color ordinal palette.
pub const CATEGORY10: [Color; 10] = [
    Color::rgb(0x1f, 0x77, 0xb4),
    Color::rgb(0xff, 0x7f, 0x0e),
    Color::rgb(0x2c, 0xa0, 0x2c),
    Color::rgb(0xd6, 0x27, 0x28),
    Color::rgb(0x94, 0x67, 0xbd),
    Color::rgb(0x8c, 0x56, 0x4b),
    Color::rgb(0xe3, 0x77, 0xc2),
    Color::rgb(0x7f, 0x7f, 0x7f),
    Color::rgb(0xbc, 0xbd, 0x22),
    Color::rgb(0x17, 0xbe, 0xcf),
];

/// 7-step sequential ramps (color-brewer).
pub const BLUES7: [Color; 7] = [
    Color::rgb(0xef, 0xf3, 0xff),
    Color::rgb(0xc6, 0xdb, 0xef),
    Color::rgb(0x9e, 0xca, 0xe1),
    Color::rgb(0x6b, 0xae, 0xd6),
    Color::rgb(0x42, 0x92, 0xc6),
    Color::rgb(0x21, 0x71, 0xb5),
    Color::rgb(0x08, 0x45, 0x94),
];

pub const REDS7: [Color; 7] = [
    Color::rgb(0xfe, 0xe5, 0xd9),
    Color::rgb(0xfc, 0xbb, 0xa1),
    Color::rgb(0xfc, 0x92, 0x72),
    Color::rgb(0xfb, 0x6a, 0x4a),
    Color::rgb(0xef, 0x3b, 0x2c),
    Color::rgb(0xcb, 0x18, 0x1d),
    Color::rgb(0x99, 0x00, 0x0d),
];

pub const GREENS7: [Color; 7] = [
    Color::rgb(0xed, 0xf8, 0xe9),
    Color::rgb(0xc7, 0xe9, 0xc0),
    Color::rgb(0xa1, 0xd9, 0x9b),
    Color::rgb(0x74, 0xc4, 0x76),
    Color::rgb(0x41, 0xab, 0x5d),
    Color::rgb(0x23, 0x8b, 0x45),
    Color::rgb(0x00, 0x5a, 0x32),
];

/// Look up a named ramp. Unknown names return `None`; callers degrade to a
/// default constant color rather than failing.
pub fn ramp_by_name(name: &str) -> Option<&'static [Color; 7]> {
    match name {
        "Blues" => Some(&BLUES7),
        "Reds" => Some(&REDS7),
        "Greens" => Some(&GREENS7),
        _ => None,
    }
}

/// Ordinal scale: a fixed domain of string keys mapped onto a color range,
/// cycling when the domain is longer than the range. Deterministic across
/// renders for a given domain order.
#[derive(Clone, Debug, Default)]
pub struct OrdinalScale {
    index: HashMap<String, usize>,
    range: Vec<Color>,
}

impl OrdinalScale {
    pub fn new<I, S>(domain: I, range: Vec<Color>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = HashMap::new();
        for (i, key) in domain.into_iter().enumerate() {
            // First occurrence wins for duplicate keys.
            index.entry(key.into()).or_insert(i);
        }
        Self { index, range }
    }

    pub fn get(&self, key: &str) -> Option<Color> {
        if self.range.is_empty() {
            return None;
        }
        self.index.get(key).map(|i| self.range[i % self.range.len()])
    }
}

/// Quantize scale: a continuous [min, max] domain split into uniform buckets,
/// one per range entry. Out-of-domain values clamp to the end buckets.
#[derive(Clone, Debug)]
pub struct QuantizeScale {
    min: f32,
    max: f32,
    range: Vec<Color>,
}

impl QuantizeScale {
    pub fn new(min: f32, max: f32, range: Vec<Color>) -> Self {
        Self { min, max, range }
    }

    pub fn get(&self, value: f32) -> Option<Color> {
        let n = self.range.len();
        if n == 0 {
            return None;
        }
        let span = self.max - self.min;
        if span <= 0.0 {
            return Some(self.range[0]);
        }
        let bucket = (((value - self.min) / span) * n as f32).floor() as isize;
        let bucket = bucket.clamp(0, n as isize - 1) as usize;
        Some(self.range[bucket])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let c = Color::from_hex("#1f77b4").unwrap();
        assert_eq!(c, Color::rgb(31, 119, 180));
        assert_eq!(c.to_hex(), "#1f77b4");
        assert_eq!(Color::from_hex("#f00").unwrap(), Color::rgb(255, 0, 0));
        assert!(Color::from_hex("ff0000").is_err());
        assert!(Color::from_hex("#zzzzzz").is_err());
    }

    #[test]
    fn darker_scales_channels() {
        let c = Color::rgb(100, 200, 0).darker();
        assert_eq!(c, Color::rgb(70, 140, 0));
    }

    #[test]
    fn ordinal_is_deterministic_and_cycles() {
        let scale = OrdinalScale::new(
            ["a", "b", "c"],
            vec![Color::rgb(1, 0, 0), Color::rgb(0, 1, 0)],
        );
        assert_eq!(scale.get("a"), Some(Color::rgb(1, 0, 0)));
        assert_eq!(scale.get("b"), Some(Color::rgb(0, 1, 0)));
        assert_eq!(scale.get("c"), Some(Color::rgb(1, 0, 0)));
        assert_eq!(scale.get("d"), None);
    }

    #[test]
    fn quantize_buckets_and_clamps() {
        let scale = QuantizeScale::new(0.0, 10.0, BLUES7.to_vec());
        assert_eq!(scale.get(-5.0), Some(BLUES7[0]));
        assert_eq!(scale.get(0.0), Some(BLUES7[0]));
        assert_eq!(scale.get(9.99), Some(BLUES7[6]));
        assert_eq!(scale.get(25.0), Some(BLUES7[6]));
    }
}
