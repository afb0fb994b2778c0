use super::*;

#[test]
fn card_canvas_is_fixed_hd() {
    assert_eq!(Canvas::CARD.width, 1280);
    assert_eq!(Canvas::CARD.height, 720);
    assert_eq!(Canvas::CARD.dims_u16().unwrap(), (1280, 720));
}

#[test]
fn oversize_canvas_is_rejected_for_raster() {
    let c = Canvas {
        width: 70_000,
        height: 10,
    };
    assert!(c.dims_u16().is_err());
}

#[test]
fn unit_alpha_rounds_half_up() {
    assert_eq!(Rgba8::with_unit_alpha(1, 2, 3, 0.5).a, 128);
    assert_eq!(Rgba8::with_unit_alpha(1, 2, 3, 1.0).a, 255);
    assert_eq!(Rgba8::with_unit_alpha(1, 2, 3, 7.0).a, 255);
}
