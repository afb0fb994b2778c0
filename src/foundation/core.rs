//! Canvas size and color primitives.

use crate::foundation::error::{GameNightError, GameNightResult};

pub use kurbo::{Affine, Point, Rect};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// The fixed card canvas every scene is laid out on.
    pub const CARD: Canvas = Canvas {
        width: 1280,
        height: 720,
    };

    /// Width/height as `u16`, as required by the raster backend.
    pub fn dims_u16(self) -> GameNightResult<(u16, u16)> {
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| GameNightError::render("canvas width exceeds u16"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| GameNightError::render("canvas height exceeds u16"))?;
        Ok((w, h))
    }

    /// Canvas bounds as a rectangle anchored at the origin.
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Straight-alpha RGBA8 color as handed to draw operations.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Construct from channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Compose a 24-bit color with a unit-interval alpha.
    ///
    /// The alpha is rounded to the nearest 8-bit step, so `0.5` becomes `128`.
    pub fn with_unit_alpha(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { r, g, b, a }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
