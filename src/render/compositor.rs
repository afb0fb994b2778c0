//! Width-scaled image placement.

use std::sync::Arc;

use crate::{
    assets::image::{Layer, PreparedImage},
    foundation::core::Rect,
    render::ops::{DrawOp, ImageOp},
};

/// Destination rectangle for `image` anchored at `(x, y)` and scaled to `target_width`.
///
/// The scale is uniform, so the aspect ratio always holds. Returns `None` for images without
/// pixel data.
pub fn scaled_dest(image: &PreparedImage, x: f64, y: f64, target_width: f64) -> Option<Rect> {
    if !image.has_pixels() {
        return None;
    }
    let scale = target_width / f64::from(image.width);
    let height = f64::from(image.height) * scale;
    Some(Rect::new(x, y, x + target_width, y + height))
}

/// Emit a draw for an optional layer; unloaded or empty layers produce nothing.
pub fn draw_image(
    layer: Layer,
    image: Option<&Arc<PreparedImage>>,
    x: f64,
    y: f64,
    target_width: f64,
) -> Option<DrawOp> {
    let image = image?;
    let Some(dest) = scaled_dest(image, x, y, target_width) else {
        tracing::trace!(?layer, "skipping layer without pixels");
        return None;
    };
    Some(DrawOp::Image(ImageOp {
        layer,
        image: Arc::clone(image),
        dest,
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
