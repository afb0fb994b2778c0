//! Outlined text draw ops.

use crate::{
    assets::color::ColorPair,
    foundation::core::Point,
    render::ops::{Align, Baseline, DrawOp, TextOp},
};

/// Outline stroke width in canvas units.
pub const OUTLINE_STROKE_WIDTH: f64 = 1.0;

/// Builds outlined text ops with a fixed color scheme.
#[derive(Clone, Debug)]
pub struct TextRenderer<'a> {
    colors: &'a ColorPair,
}

impl<'a> TextRenderer<'a> {
    /// Renderer using `colors` for every line.
    pub fn new(colors: &'a ColorPair) -> Self {
        Self { colors }
    }

    /// Top-anchored, centered line (the common case).
    pub fn draw(&self, text: impl Into<String>, size_px: f32, x: f64, y: f64) -> DrawOp {
        self.draw_text(text, size_px, x, y, Baseline::Top, Align::Center)
    }

    /// Line with explicit anchoring.
    pub fn draw_text(
        &self,
        text: impl Into<String>,
        size_px: f32,
        x: f64,
        y: f64,
        baseline: Baseline,
        align: Align,
    ) -> DrawOp {
        let (fill, outline) = self.colors.paints();
        DrawOp::Text(TextOp {
            text: text.into(),
            size_px,
            anchor: Point::new(x, y),
            fill,
            outline,
            stroke_width: OUTLINE_STROKE_WIDTH,
            baseline,
            align,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
