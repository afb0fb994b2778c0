use std::io::Cursor;

use super::*;
use crate::{
    assets::color::ColorPair,
    render::{backend::FrameRGBA, ops::ScenePlan},
};

/// Records plans instead of rasterizing them.
struct PlanRecorder {
    plans: std::rc::Rc<std::cell::RefCell<Vec<ScenePlan>>>,
}

impl RenderBackend for PlanRecorder {
    fn render_plan(&mut self, plan: &ScenePlan) -> GameNightResult<FrameRGBA> {
        self.plans.borrow_mut().push(plan.clone());
        Ok(FrameRGBA {
            width: 1,
            height: 1,
            data: vec![0, 0, 0, 0],
            premultiplied: true,
        })
    }
}

fn session() -> (RenderSession, std::rc::Rc<std::cell::RefCell<Vec<ScenePlan>>>) {
    let plans = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let backend = PlanRecorder {
        plans: plans.clone(),
    };
    let state = RenderState::new("Blitz", ColorPair::default(), "2024-06-15", "18:30");
    (RenderSession::new(state, Box::new(backend)), plans)
}

fn write_png(name: &str, w: u32, h: u32) -> PathBuf {
    let path = std::env::temp_dir().join(format!("gamenight_{}_{}.png", name, std::process::id()));
    let img = image::RgbaImage::from_raw(w, h, vec![200; (w * h * 4) as usize]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(&path, buf).unwrap();
    path
}

#[test]
fn pump_without_events_does_not_render() {
    let (mut s, plans) = session();
    assert!(s.pump().unwrap().is_none());
    assert_eq!(s.stats().renders, 0);
    assert!(plans.borrow().is_empty());
}

#[test]
fn burst_of_events_collapses_into_one_render_of_latest_state() {
    let (mut s, plans) = session();
    let tx = s.sender();
    assert!(tx.send(InputEvent::Time("19:00".into())));
    assert!(tx.send(InputEvent::Time("20:45".into())));
    assert!(tx.send(InputEvent::Template("Renegade".into())));

    let export = s.pump().unwrap().unwrap();
    assert_eq!(export.filename, "renegade_game_night.png");
    assert_eq!(s.stats().renders, 1);
    assert_eq!(s.stats().events_applied, 3);

    let plans = plans.borrow();
    assert_eq!(plans.len(), 1);
    assert!(plans[0].texts().any(|t| t.text == "20:45 GMT"));
    assert!(plans[0].texts().any(|t| t.text == "RENEGADE"));
}

#[test]
fn clearing_the_date_removes_the_date_card() {
    let (mut s, plans) = session();
    s.sender().send(InputEvent::Date(String::new()));
    s.pump().unwrap();
    assert!(!plans.borrow()[0].texts().any(|t| t.text.ends_with("GMT")));
    assert!(!s.state().moment().is_valid());
}

#[test]
fn layer_loads_arrive_from_worker_threads() {
    let (mut s, plans) = session();
    let badge = write_png("badge", 8, 8);
    let backdrop = write_png("backdrop", 16, 9);

    s.load_layer(Layer::Badge, badge.clone());
    s.load_layer(Layer::Backdrop, backdrop.clone());
    assert_eq!(s.pending_loads(), 2);

    s.pump_until_loaded().unwrap();
    assert_eq!(s.pending_loads(), 0);
    assert!(s.state().layer(Layer::Badge).is_some());
    assert!(s.state().layer(Layer::Backdrop).is_some());
    assert_eq!(plans.borrow().last().unwrap().images().count(), 2);

    std::fs::remove_file(badge).ok();
    std::fs::remove_file(backdrop).ok();
}

#[test]
fn failed_load_keeps_previous_layer_and_still_renders() {
    let (mut s, _plans) = session();
    let missing = std::env::temp_dir().join("gamenight_missing_template.png");
    s.load_layer(Layer::Template, missing);

    let export = s.pump_until_loaded().unwrap();
    assert_eq!(export.filename, "blitz_game_night.png");
    assert_eq!(s.stats().failed_loads, 1);
    assert!(s.state().layer(Layer::Template).is_none());
}

#[test]
fn panicking_loader_reports_failure_instead_of_hanging() {
    let (mut s, _plans) = session();
    let worker = s.load_layer_with(Layer::Backdrop, || panic!("decoder blew up"));
    s.load_layer_with(Layer::Badge, || {
        PreparedImage::from_straight_rgba8(2, 2, vec![255; 16])
    });

    s.pump_until_loaded().unwrap();
    assert!(worker.join().is_ok());
    assert_eq!(s.stats().failed_loads, 1);
    assert!(s.state().layer(Layer::Backdrop).is_none());
    assert!(s.state().layer(Layer::Badge).is_some());
}

#[test]
fn panic_message_carries_payload_text() {
    let payload: Box<dyn Any + Send> = Box::new(String::from("bad header"));
    assert_eq!(
        panic_message(payload.as_ref()),
        "layer loader panicked: bad header"
    );
}
