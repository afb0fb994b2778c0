//! Hex color inputs and the fill/outline paint pair.

use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;

/// Alpha used for the text fill.
pub const FILL_ALPHA: f32 = 1.0;
/// Alpha used for the text outline; the halo is intentionally half transparent.
pub const OUTLINE_ALPHA: f32 = 0.5;

/// A 24-bit color as typed into a color field (`#RRGGBB`).
///
/// Parsing never fails. The hex digits are read like a leading-prefix integer parse; when there
/// are no leading hex digits the value is `0` (black).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    /// Wrap a raw color string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw string as supplied.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Integer value after stripping the first `#`.
    ///
    /// Digits past the 32nd bit wrap; only the low 24 bits are used.
    pub fn value(&self) -> u32 {
        let s = self.0.replacen('#', "", 1);
        let s = s.trim_start();
        let (neg, digits) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let digits = digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("0X"))
            .unwrap_or(digits);

        let mut v: u32 = 0;
        for c in digits.chars() {
            let Some(d) = c.to_digit(16) else {
                break;
            };
            v = v.wrapping_mul(16).wrapping_add(d);
        }
        if neg { v.wrapping_neg() } else { v }
    }

    /// Red/green/blue extracted by bit-masking [`HexColor::value`].
    pub fn rgb(&self) -> (u8, u8, u8) {
        let v = self.value();
        let r = ((v & 0x00FF_0000) >> 16) as u8;
        let g = ((v & 0x0000_FF00) >> 8) as u8;
        let b = (v & 0x0000_00FF) as u8;
        (r, g, b)
    }

    /// Compose with a unit-interval alpha. No gamma correction.
    pub fn to_rgba8(&self, alpha: f32) -> Rgba8 {
        let (r, g, b) = self.rgb();
        Rgba8::with_unit_alpha(r, g, b, alpha)
    }
}

impl From<&str> for HexColor {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Text fill and outline colors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPair {
    /// Glyph fill, drawn opaque.
    pub fill: HexColor,
    /// Glyph outline, drawn at half opacity.
    pub outline: HexColor,
}

impl Default for ColorPair {
    fn default() -> Self {
        Self {
            fill: HexColor::new("#FFFFFF"),
            outline: HexColor::new("#000000"),
        }
    }
}

impl ColorPair {
    /// Build from two raw strings.
    pub fn new(fill: impl Into<String>, outline: impl Into<String>) -> Self {
        Self {
            fill: HexColor::new(fill),
            outline: HexColor::new(outline),
        }
    }

    /// Resolved paint colors, `(fill, outline)`.
    pub fn paints(&self) -> (Rgba8, Rgba8) {
        (
            self.fill.to_rgba8(FILL_ALPHA),
            self.outline.to_rgba8(OUTLINE_ALPHA),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
