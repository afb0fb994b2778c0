//! Decoded raster layers in premultiplied RGBA8.

use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::foundation::{
    error::{GameNightError, GameNightResult},
    math::premultiply_rgba8_in_place,
};

/// Decoded raster layer in premultiplied RGBA8 form.
#[derive(Clone, PartialEq, Eq)]
pub struct PreparedImage {
    /// Intrinsic width in pixels.
    pub width: u32,
    /// Intrinsic height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl std::fmt::Debug for PreparedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba8_premul.len())
            .finish()
    }
}

impl PreparedImage {
    /// Wrap straight-alpha RGBA8 pixels, premultiplying them.
    pub fn from_straight_rgba8(width: u32, height: u32, mut rgba: Vec<u8>) -> GameNightResult<Self> {
        if rgba.len() != width as usize * height as usize * 4 {
            return Err(GameNightError::asset("rgba byte length does not match dimensions"));
        }
        premultiply_rgba8_in_place(&mut rgba);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba),
        })
    }

    /// `true` when the image has pixel data to draw.
    pub fn has_pixels(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// The three independently loaded raster layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    /// User-supplied photo beneath the template.
    Backdrop,
    /// Themed overlay selected by template name.
    Template,
    /// Fixed platform icon on the Discord card.
    Badge,
}

/// Decode PNG/JPEG/etc. bytes into a [`PreparedImage`].
pub fn decode_image(bytes: &[u8]) -> GameNightResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PreparedImage::from_straight_rgba8(width, height, rgba.into_raw())
}

/// Read and decode an image file.
pub fn load_image_file(path: &Path) -> GameNightResult<PreparedImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes).map_err(|e| GameNightError::asset(format!("{}: {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/image.rs"]
mod tests;
