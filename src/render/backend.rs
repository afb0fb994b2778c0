//! Backend trait, settings, and rendered frame output.

use std::io::Cursor;

use anyhow::Context;

use crate::{
    assets::font::{FontFace, find_system_bold_sans},
    foundation::{
        error::{GameNightError, GameNightResult},
        math::unpremultiply_rgba8_in_place,
    },
    render::ops::ScenePlan,
};

/// A rendered frame as RGBA8 pixels.
///
/// Backends return **premultiplied** alpha; the flag makes that explicit at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy of the pixel data.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut out);
        }
        out
    }

    /// Encode as a lossless PNG.
    pub fn encode_png(&self) -> GameNightResult<Vec<u8>> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.to_straight_rgba8())
            .ok_or_else(|| GameNightError::render("frame byte length does not match dimensions"))?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode frame as png")?;
        Ok(buf)
    }
}

/// A rasterizer that executes a [`ScenePlan`].
///
/// Every call starts from a cleared canvas, so executing the same plan twice yields the same
/// bytes.
pub trait RenderBackend {
    /// Clear, run every op in order, and read back the frame.
    fn render_plan(&mut self, plan: &ScenePlan) -> GameNightResult<FrameRGBA>;
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug, Default)]
pub enum BackendKind {
    /// CPU raster backend powered by `vello_cpu`.
    #[default]
    Cpu,
}

/// Where card text gets its glyphs from.
#[derive(Clone, Debug, Default)]
pub enum FontSource {
    /// First bold sans-serif found among system fonts.
    #[default]
    System,
    /// An already-loaded face.
    Face(FontFace),
    /// Draw no text at all.
    Disabled,
}

impl FontSource {
    /// Resolve to a concrete face, if any.
    pub fn resolve(&self) -> Option<FontFace> {
        match self {
            Self::System => find_system_bold_sans(),
            Self::Face(f) => Some(f.clone()),
            Self::Disabled => None,
        }
    }
}

/// Backend-agnostic settings.
#[derive(Clone, Debug, Default)]
pub struct RenderSettings {
    /// If set, the canvas is cleared to this straight RGBA8 color instead of transparent.
    pub clear_rgba: Option<[u8; 4]>,
    /// Font used for every text op.
    pub font: FontSource,
}

/// Create a rendering backend implementation.
pub fn create_backend(
    kind: BackendKind,
    settings: &RenderSettings,
) -> GameNightResult<Box<dyn RenderBackend>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(crate::render::cpu::CpuBackend::new(
            settings.clone(),
        )?)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
