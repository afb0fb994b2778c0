use std::sync::Arc;

use super::*;
use crate::{
    assets::{color::ColorPair, image::Layer},
    foundation::core::Canvas,
    render::{backend::FontSource, compositor::draw_image, text::TextRenderer},
};

const SMALL: Canvas = Canvas {
    width: 64,
    height: 32,
};

fn solid(w: u32, h: u32, px: [u8; 4]) -> Arc<PreparedImage> {
    let raw: Vec<u8> = std::iter::repeat_n(px, (w * h) as usize).flatten().collect();
    Arc::new(PreparedImage::from_straight_rgba8(w, h, raw).unwrap())
}

fn no_text_backend(clear: Option<[u8; 4]>) -> CpuBackend {
    CpuBackend::new(RenderSettings {
        clear_rgba: clear,
        font: FontSource::Disabled,
    })
    .unwrap()
}

fn pixel(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

#[test]
fn empty_plan_is_transparent() {
    let mut backend = no_text_backend(None);
    let frame = backend.render_plan(&ScenePlan::new(SMALL)).unwrap();
    assert_eq!((frame.width, frame.height), (64, 32));
    assert!(frame.premultiplied);
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn clear_color_fills_canvas() {
    let mut backend = no_text_backend(Some([0, 0, 255, 255]));
    let frame = backend.render_plan(&ScenePlan::new(SMALL)).unwrap();
    assert_eq!(pixel(&frame, 10, 10), [0, 0, 255, 255]);
}

#[test]
fn later_layers_paint_over_earlier_ones() {
    let mut plan = ScenePlan::new(SMALL);
    let red = solid(8, 4, [255, 0, 0, 255]);
    let green = solid(4, 4, [0, 255, 0, 255]);
    plan.push(draw_image(Layer::Backdrop, Some(&red), 0.0, 0.0, 64.0).unwrap());
    plan.push(draw_image(Layer::Template, Some(&green), 0.0, 0.0, 16.0).unwrap());

    let mut backend = no_text_backend(None);
    let frame = backend.render_plan(&plan).unwrap();
    assert_eq!(pixel(&frame, 8, 8), [0, 255, 0, 255]);
    assert_eq!(pixel(&frame, 40, 16), [255, 0, 0, 255]);
}

#[test]
fn rendering_twice_is_byte_identical() {
    let mut plan = ScenePlan::new(SMALL);
    let img = solid(3, 2, [10, 200, 30, 200]);
    plan.push(draw_image(Layer::Backdrop, Some(&img), 3.0, 2.0, 50.0).unwrap());

    let mut backend = no_text_backend(Some([1, 2, 3, 255]));
    let a = backend.render_plan(&plan).unwrap();
    let b = backend.render_plan(&plan).unwrap();
    assert_eq!(a, b);
}

#[test]
fn text_without_font_is_skipped() {
    let colors = ColorPair::default();
    let mut plan = ScenePlan::new(SMALL);
    plan.push(TextRenderer::new(&colors).draw("W3D HUB", 12.0, 32.0, 4.0));

    let mut backend = no_text_backend(None);
    assert!(!backend.has_font());
    let frame = backend.render_plan(&plan).unwrap();
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn text_with_system_font_marks_pixels_if_present() {
    let mut backend = CpuBackend::new(RenderSettings::default()).unwrap();
    if !backend.has_font() {
        return;
    }

    let colors = ColorPair::new("#FFFFFF", "#000000");
    let mut plan = ScenePlan::new(SMALL);
    plan.push(TextRenderer::new(&colors).draw("W3D", 20.0, 32.0, 4.0));

    let frame = backend.render_plan(&plan).unwrap();
    assert!(frame.data.iter().any(|&b| b != 0));
}

#[test]
fn layer_past_pixmap_limit_is_resampled_to_its_destination() {
    let mut plan = ScenePlan::new(SMALL);
    plan.push(DrawOp::Image(ImageOp {
        layer: Layer::Backdrop,
        image: solid(70_000, 1, [255, 0, 0, 255]),
        dest: Rect::new(0.0, 0.0, 64.0, 32.0),
    }));

    let mut backend = no_text_backend(None);
    let frame = backend.render_plan(&plan).unwrap();
    let [r, g, b, a] = pixel(&frame, 10, 10);
    assert!(r > 250 && a > 250, "got {:?}", [r, g, b, a]);
    assert_eq!((g, b), (0, 0));
}

#[test]
fn unusable_layer_is_skipped_and_later_layers_still_render() {
    let broken = Arc::new(PreparedImage {
        width: 4,
        height: 4,
        rgba8_premul: Arc::new(vec![0; 3]),
    });
    let green = solid(4, 4, [0, 255, 0, 255]);

    let mut plan = ScenePlan::new(SMALL);
    plan.push(draw_image(Layer::Backdrop, Some(&broken), 0.0, 0.0, 64.0).unwrap());
    plan.push(draw_image(Layer::Template, Some(&green), 0.0, 0.0, 16.0).unwrap());

    let mut backend = no_text_backend(None);
    let frame = backend.render_plan(&plan).unwrap();
    assert_eq!(pixel(&frame, 8, 8), [0, 255, 0, 255]);
    assert_eq!(pixel(&frame, 40, 20), [0, 0, 0, 0]);
}
