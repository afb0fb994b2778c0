//! Font discovery and single-line text shaping.

use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::foundation::{
    core::Rgba8,
    error::{GameNightError, GameNightResult},
};

/// Family preference for card text; the generic sans-serif is tried last.
pub const PREFERRED_FAMILIES: [&str; 3] = ["Noto Sans", "DejaVu Sans", "Liberation Sans"];

/// Raw font face bytes plus the family name they register under.
#[derive(Clone)]
pub struct FontFace {
    /// Family name reported by the font.
    pub family: String,
    /// Whole font file (may be a collection).
    pub bytes: Arc<Vec<u8>>,
    /// Face index within a collection.
    pub index: u32,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("family", &self.family)
            .field("bytes", &self.bytes.len())
            .field("index", &self.index)
            .finish()
    }
}

/// Load a font file from disk.
pub fn load_font_file(path: &Path) -> GameNightResult<FontFace> {
    let bytes = std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;

    let mut db = usvg::fontdb::Database::new();
    db.load_font_data(bytes.clone());
    let family = db
        .faces()
        .next()
        .and_then(|face| face.families.first().map(|(name, _)| name.clone()))
        .ok_or_else(|| {
            GameNightError::asset(format!("'{}' contains no usable font face", path.display()))
        })?;

    Ok(FontFace {
        family,
        bytes: Arc::new(bytes),
        index: 0,
    })
}

/// Find a bold sans-serif face among the installed system fonts.
pub fn find_system_bold_sans() -> Option<FontFace> {
    use usvg::fontdb::{Database, Family, Query, Weight};

    let mut db = Database::new();
    db.load_system_fonts();

    let mut families: Vec<Family<'_>> = PREFERRED_FAMILIES
        .iter()
        .copied()
        .map(Family::Name)
        .collect();
    families.push(Family::SansSerif);

    let id = db.query(&Query {
        families: &families,
        weight: Weight::BOLD,
        ..Query::default()
    })?;

    let family = db
        .face(id)
        .and_then(|face| face.families.first().map(|(name, _)| name.clone()))?;
    let (bytes, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;

    tracing::debug!(%family, index, "resolved system font");
    Some(FontFace {
        family,
        bytes: Arc::new(bytes),
        index,
    })
}

/// Stateful helper for shaping single-line card text with one registered face.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    family: String,
}

impl TextLayoutEngine {
    /// Register `face` with a fresh Parley context.
    pub(crate) fn new(face: &FontFace) -> GameNightResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(face.bytes.as_ref().clone()),
            None,
        );
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            GameNightError::asset("no font families registered from font bytes")
        })?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| GameNightError::asset("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
        })
    }

    /// Family name the face registered under.
    pub(crate) fn family(&self) -> &str {
        &self.family
    }

    /// Shape `text` as a single unwrapped bold line.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: Rgba8,
    ) -> GameNightResult<parley::Layout<Rgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(GameNightError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::BOLD,
        ));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
