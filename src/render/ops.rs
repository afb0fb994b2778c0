//! Backend-independent draw operations.

use std::sync::Arc;

use crate::{
    assets::image::{Layer, PreparedImage},
    foundation::core::{Canvas, Point, Rect, Rgba8},
};

/// Vertical anchor of a text line relative to its `y` coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Baseline {
    /// `y` is the top of the line box.
    #[default]
    Top,
    /// `y` is the bottom of the line box.
    Bottom,
}

/// Horizontal anchor of a text line relative to its `x` coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Align {
    /// `x` is the left edge.
    Left,
    /// `x` is the horizontal center.
    #[default]
    Center,
    /// `x` is the right edge.
    Right,
}

impl Align {
    /// Offset to subtract from `x` for a line of `width`.
    pub fn offset(self, width: f64) -> f64 {
        match self {
            Self::Left => 0.0,
            Self::Center => width / 2.0,
            Self::Right => width,
        }
    }
}

/// One outlined text line.
#[derive(Clone, Debug, PartialEq)]
pub struct TextOp {
    /// Already-cased display string.
    pub text: String,
    /// Font size in pixels.
    pub size_px: f32,
    /// Anchor point interpreted through `baseline` and `align`.
    pub anchor: Point,
    /// Fill paint (drawn first).
    pub fill: Rgba8,
    /// Outline paint (stroked second, on top of the fill).
    pub outline: Rgba8,
    /// Outline stroke width.
    pub stroke_width: f64,
    /// Vertical anchoring.
    pub baseline: Baseline,
    /// Horizontal anchoring.
    pub align: Align,
}

/// One scaled raster layer.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageOp {
    /// Which layer produced the draw.
    pub layer: Layer,
    /// Source pixels; the whole image is drawn.
    pub image: Arc<PreparedImage>,
    /// Destination rectangle in canvas space.
    pub dest: Rect,
}

/// Ordered draw operation; later ops paint over earlier ones.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Scaled bitmap.
    Image(ImageOp),
    /// Outlined text.
    Text(TextOp),
}

impl DrawOp {
    /// Text payload, when this is a text op.
    pub fn as_text(&self) -> Option<&TextOp> {
        match self {
            Self::Text(t) => Some(t),
            Self::Image(_) => None,
        }
    }

    /// Image payload, when this is an image op.
    pub fn as_image(&self) -> Option<&ImageOp> {
        match self {
            Self::Image(i) => Some(i),
            Self::Text(_) => None,
        }
    }
}

/// Backend-agnostic plan for one frame: clear the canvas, then run `ops` in order.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenePlan {
    /// Target canvas.
    pub canvas: Canvas,
    /// Draw operations in z-order.
    pub ops: Vec<DrawOp>,
}

impl ScenePlan {
    /// Empty plan on the card canvas.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            ops: Vec::new(),
        }
    }

    /// Append an op.
    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    /// Text lines in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &TextOp> {
        self.ops.iter().filter_map(DrawOp::as_text)
    }

    /// Image draws in draw order.
    pub fn images(&self) -> impl Iterator<Item = &ImageOp> {
        self.ops.iter().filter_map(DrawOp::as_image)
    }
}
