//! CPU raster backend built on vello_cpu.

use std::{collections::HashMap, sync::Arc};

use crate::{
    assets::{font::TextLayoutEngine, image::PreparedImage},
    foundation::{
        core::{Affine, Rect, Rgba8},
        error::{GameNightError, GameNightResult},
    },
    render::{
        backend::{FrameRGBA, RenderBackend, RenderSettings},
        ops::{Baseline, DrawOp, ImageOp, ScenePlan, TextOp},
    },
};

/// CPU raster backend: `vello_cpu` for paths and images, `parley` for shaping.
pub struct CpuBackend {
    settings: RenderSettings,
    text: Option<CpuText>,
    image_cache: HashMap<usize, CachedImage>,
    ctx: Option<vello_cpu::RenderContext>,
    warned_no_font: bool,
}

struct CpuText {
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
}

struct CachedImage {
    // Keeps the pointer key alive for as long as the entry exists.
    _source: Arc<PreparedImage>,
    paint: vello_cpu::Image,
    size: (f64, f64),
}

impl CpuBackend {
    /// Build a backend, resolving the configured font once.
    pub fn new(settings: RenderSettings) -> GameNightResult<Self> {
        let text = match settings.font.resolve() {
            Some(face) => {
                let engine = TextLayoutEngine::new(&face)?;
                tracing::debug!(family = engine.family(), "cpu backend font ready");
                let font = vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(face.bytes.as_ref().clone()),
                    face.index,
                );
                Some(CpuText { engine, font })
            }
            None => None,
        };

        Ok(Self {
            settings,
            text,
            image_cache: HashMap::new(),
            ctx: None,
            warned_no_font: false,
        })
    }

    /// `true` when text ops will produce glyphs.
    pub fn has_font(&self) -> bool {
        self.text.is_some()
    }

    fn image_paint_for(
        &mut self,
        image: &Arc<PreparedImage>,
        dest: Rect,
    ) -> GameNightResult<(vello_cpu::Image, (f64, f64))> {
        let key = Arc::as_ptr(image) as usize;
        if let Some(cached) = self.image_cache.get(&key) {
            return Ok((cached.paint.clone(), cached.size));
        }

        let pixmap = layer_pixmap(image, dest)?;
        let size = (f64::from(pixmap.width()), f64::from(pixmap.height()));
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.image_cache.insert(
            key,
            CachedImage {
                _source: Arc::clone(image),
                paint: paint.clone(),
                size,
            },
        );
        Ok((paint, size))
    }

    fn draw_image(&mut self, ctx: &mut vello_cpu::RenderContext, op: &ImageOp) {
        let (paint, (w, h)) = match self.image_paint_for(&op.image, op.dest) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(layer = ?op.layer, error = %e, "layer skipped");
                return;
            }
        };

        let place = Affine::translate((op.dest.x0, op.dest.y0))
            * Affine::scale_non_uniform(op.dest.width() / w, op.dest.height() / h);
        ctx.set_transform(affine_to_cpu(place));
        ctx.set_paint(paint);
        ctx.fill_rect(&rect_to_cpu(Rect::new(0.0, 0.0, w, h)));
    }

    fn draw_text(&mut self, ctx: &mut vello_cpu::RenderContext, op: &TextOp) -> GameNightResult<()> {
        let Some(text) = self.text.as_mut() else {
            if !self.warned_no_font {
                tracing::warn!("no font available; card text is not drawn");
                self.warned_no_font = true;
            }
            return Ok(());
        };

        let layout = text.engine.layout_line(&op.text, op.size_px, op.fill)?;
        let width = f64::from(layout.width());
        let height = f64::from(layout.height());

        let x = op.anchor.x - op.align.offset(width);
        let y = match op.baseline {
            Baseline::Top => op.anchor.y,
            Baseline::Bottom => op.anchor.y - height,
        };
        ctx.set_transform(affine_to_cpu(Affine::translate((x, y))));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let size = run.run().font_size();
                let glyphs: Vec<vello_cpu::Glyph> = run
                    .positioned_glyphs()
                    .map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    })
                    .collect();

                // Fill first, then the half-transparent outline on top of the fill edge.
                ctx.set_paint(color_to_cpu(run.style().brush));
                ctx.glyph_run(&text.font)
                    .font_size(size)
                    .fill_glyphs(glyphs.iter().cloned());

                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(op.stroke_width));
                ctx.set_paint(color_to_cpu(op.outline));
                ctx.glyph_run(&text.font)
                    .font_size(size)
                    .stroke_glyphs(glyphs.iter().cloned());
            }
        }
        Ok(())
    }
}

impl RenderBackend for CpuBackend {
    #[tracing::instrument(skip_all, fields(ops = plan.ops.len()))]
    fn render_plan(&mut self, plan: &ScenePlan) -> GameNightResult<FrameRGBA> {
        let (w, h) = plan.canvas.dims_u16()?;

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        if let Some([r, g, b, a]) = self.settings.clear_rgba {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(color_to_cpu(Rgba8::new(r, g, b, a)));
            ctx.fill_rect(&rect_to_cpu(plan.canvas.bounds()));
        }

        let result = plan.ops.iter().try_for_each(|op| match op {
            DrawOp::Image(i) => {
                self.draw_image(&mut ctx, i);
                Ok(())
            }
            DrawOp::Text(t) => self.draw_text(&mut ctx, t),
        });
        if let Err(e) = result {
            self.ctx = Some(ctx);
            return Err(e);
        }

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);

        // Drop cached paints for layers that were swapped out.
        let live: Vec<usize> = plan
            .images()
            .map(|i| Arc::as_ptr(&i.image) as usize)
            .collect();
        self.image_cache.retain(|k, _| live.contains(k));

        Ok(FrameRGBA {
            width: plan.canvas.width,
            height: plan.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

/// Pixmap for a layer; layers past the pixmap size limit are resampled to their destination size.
fn layer_pixmap(image: &PreparedImage, dest: Rect) -> GameNightResult<vello_cpu::Pixmap> {
    let max = u32::from(u16::MAX);
    if image.width <= max && image.height <= max {
        return image_premul_bytes_to_pixmap(
            image.rgba8_premul.as_slice(),
            image.width,
            image.height,
        );
    }

    let fit = |v: f64| v.round().clamp(1.0, f64::from(u16::MAX)) as u32;
    let (w, h) = (fit(dest.width()), fit(dest.height()));
    let src = image::RgbaImage::from_raw(image.width, image.height, image.rgba8_premul.to_vec())
        .ok_or_else(|| GameNightError::render("prepared image byte length mismatch"))?;
    let resized = image::imageops::resize(&src, w, h, image::imageops::FilterType::Triangle);
    tracing::debug!(
        from_width = image.width,
        from_height = image.height,
        to_width = w,
        to_height = h,
        "resampled oversized layer"
    );
    image_premul_bytes_to_pixmap(resized.as_raw(), w, h)
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> GameNightResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| GameNightError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| GameNightError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(GameNightError::render("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
