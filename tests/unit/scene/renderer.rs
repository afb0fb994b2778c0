use std::sync::Arc;

use super::*;
use crate::{
    assets::{color::ColorPair, image::PreparedImage},
    foundation::core::{Point, Rect},
    render::ops::{DrawOp, TextOp},
};

fn blitz(date: &str, time: &str) -> RenderState {
    RenderState::new("Blitz", ColorPair::new("#FFFFFF", "#000000"), date, time)
}

fn texts(plan: &ScenePlan) -> Vec<&str> {
    plan.texts().map(|t| t.text.as_str()).collect()
}

fn find<'a>(plan: &'a ScenePlan, text: &str) -> &'a TextOp {
    plan.texts().find(|t| t.text == text).unwrap()
}

fn img(w: u32, h: u32) -> Arc<PreparedImage> {
    Arc::new(PreparedImage::from_straight_rgba8(w, h, vec![255; (w * h * 4) as usize]).unwrap())
}

#[test]
fn end_to_end_text_content_and_order() {
    let plan = SceneRenderer::new().plan(&blitz("2024-06-15", "18:30"));
    assert_eq!(
        texts(&plan),
        vec![
            "SATURDAY",
            "JUNE 15",
            "18:30 GMT",
            "Sun 4:30 AM AEST",
            "2:30 PM EDT",
            "11:30 AM PDT",
            "W3D HUB",
            "BLITZ",
            "GAME SERVER",
            "W3D HUB",
            "DISCORD SERVER",
            "https://discord.gg/jMmmRa2",
        ]
    );
    assert_eq!(plan.images().count(), 0);
    assert_eq!(export_filename("Blitz"), "blitz_game_night.png");
}

#[test]
fn date_card_anchors() {
    let plan = SceneRenderer::new().plan(&blitz("2024-06-15", "18:30"));

    let day = find(&plan, "SATURDAY");
    assert_eq!(day.anchor, Point::new(360.0, 468.0));
    assert_eq!((day.baseline, day.align), (Baseline::Top, Align::Center));
    assert_eq!(day.size_px, 36.0);

    assert_eq!(find(&plan, "JUNE 15").anchor, Point::new(360.0, 504.0));

    let time = find(&plan, "18:30 GMT");
    assert_eq!(time.anchor, Point::new(360.0, 578.0));
    assert_eq!(time.baseline, Baseline::Bottom);
    assert_eq!(time.size_px, 32.0);
}

#[test]
fn roster_stacks_upward_with_first_zone_on_top() {
    let plan = SceneRenderer::new().plan(&blitz("2024-06-15", "18:30"));
    let zones: Vec<&TextOp> = plan.texts().skip(3).take(3).collect();

    let ys: Vec<f64> = zones.iter().map(|t| t.anchor.y).collect();
    assert_eq!(ys, vec![632.0, 614.5, 597.0]);
    for z in &zones {
        assert_eq!((z.baseline, z.align), (Baseline::Bottom, Align::Right));
        assert_eq!(z.anchor.x, 488.0);
        assert_eq!(z.size_px, 17.5);
    }
    // Last drawn, topmost line belongs to the first configured zone (Los Angeles).
    assert!(zones[2].text.ends_with("PDT"));
}

#[test]
fn invalid_moment_suppresses_only_the_date_card() {
    let renderer = SceneRenderer::new();
    let valid = renderer.plan(&blitz("2024-06-15", "18:30"));
    let invalid = renderer.plan(&blitz("", ""));

    assert_eq!(invalid.texts().count(), valid.texts().count() - 6);
    let tail_valid: Vec<&TextOp> = valid.texts().skip(6).collect();
    let tail_invalid: Vec<&TextOp> = invalid.texts().collect();
    assert_eq!(tail_valid, tail_invalid);

    let date_card = renderer.layout().card(CardId::Date).to_rect();
    assert!(invalid.texts().all(|t| !date_card.contains(t.anchor)));
}

#[test]
fn server_block_is_vertically_centered() {
    let plan = SceneRenderer::new().plan(&blitz("2024-06-15", "18:30"));
    let ys: Vec<f64> = ["W3D HUB", "BLITZ", "GAME SERVER"]
        .iter()
        .map(|s| {
            plan.texts()
                .find(|t| t.text == *s && t.anchor.x == 640.0)
                .unwrap()
                .anchor
                .y
        })
        .collect();
    assert_eq!(ys, vec![516.0, 544.0, 572.0]);
}

#[test]
fn template_name_is_uppercased_verbatim() {
    let state = RenderState::new("Tiberian Sun", ColorPair::default(), "", "");
    let plan = SceneRenderer::new().plan(&state);
    assert!(texts(&plan).contains(&"TIBERIAN SUN"));
    assert_eq!(export_filename(state.template()), "tiberian sun_game_night.png");
}

#[test]
fn discord_card_layout_and_badge_placement() {
    let mut state = blitz("2024-06-15", "18:30");
    state.set_layer(Layer::Badge, img(128, 96));
    let plan = SceneRenderer::new().plan(&state);

    let badge = plan.images().find(|i| i.layer == Layer::Badge).unwrap();
    assert_eq!(badge.dest, Rect::new(884.5, 536.694, 956.5, 536.694 + 54.0));

    let invite = find(&plan, DISCORD_INVITE);
    assert_eq!(invite.anchor, Point::new(920.0, 632.0));
    assert_eq!((invite.baseline, invite.align), (Baseline::Bottom, Align::Center));
    assert_eq!(find(&plan, "DISCORD SERVER").anchor, Point::new(920.0, 504.0));
}

#[test]
fn layers_draw_backdrop_then_template_beneath_text() {
    let mut state = blitz("2024-06-15", "18:30");
    state.set_layer(Layer::Template, img(2560, 1440));
    state.set_layer(Layer::Backdrop, img(640, 480));
    state.set_layer(Layer::Badge, img(10, 10));
    let plan = SceneRenderer::new().plan(&state);

    let DrawOp::Image(first) = &plan.ops[0] else {
        panic!("backdrop must be drawn first");
    };
    let DrawOp::Image(second) = &plan.ops[1] else {
        panic!("template must be drawn second");
    };
    assert_eq!(first.layer, Layer::Backdrop);
    assert_eq!(first.dest, Rect::new(0.0, 0.0, 1280.0, 960.0));
    assert_eq!(second.layer, Layer::Template);
    assert_eq!(second.dest, Rect::new(0.0, 0.0, 1280.0, 720.0));
    assert!(matches!(plan.ops[2], DrawOp::Text(_)));
}

#[test]
fn unloaded_layers_are_skipped_without_affecting_text() {
    let mut with_template = blitz("2024-06-15", "18:30");
    with_template.set_layer(Layer::Template, img(16, 9));
    let bare = blitz("2024-06-15", "18:30");

    let r = SceneRenderer::new();
    let a = r.plan(&with_template);
    let b = r.plan(&bare);
    assert_eq!(a.ops.len(), b.ops.len() + 1);
    assert_eq!(
        a.texts().collect::<Vec<_>>(),
        b.texts().collect::<Vec<_>>()
    );
}

#[test]
fn planning_is_idempotent() {
    let mut state = blitz("2024-06-15", "18:30");
    state.set_layer(Layer::Badge, img(4, 4));
    let r = SceneRenderer::new();
    assert_eq!(r.plan(&state), r.plan(&state));
}

#[test]
fn colors_flow_into_every_text_op() {
    let state = RenderState::new("Blitz", ColorPair::new("#FF0000", "#00FF00"), "", "");
    let plan = SceneRenderer::new().plan(&state);
    for t in plan.texts() {
        assert_eq!((t.fill.r, t.fill.a), (255, 255));
        assert_eq!((t.outline.g, t.outline.a), (255, 128));
    }
}
