use super::*;

#[test]
fn mul_div255_rounds() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(100, 128), ((100u16 * 128 + 127) / 255) as u8);
    assert_eq!(mul_div255_u8(0, 200), 0);
}

#[test]
fn premultiply_zeroes_transparent_pixels() {
    let mut px = vec![10u8, 20, 30, 0, 200, 100, 50, 255];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[0, 0, 0, 0]);
    assert_eq!(&px[4..], &[200, 100, 50, 255]);
}

#[test]
fn unpremultiply_restores_half_alpha_within_one_step() {
    let mut px = vec![200u8, 100, 50, 128];
    premultiply_rgba8_in_place(&mut px);
    unpremultiply_rgba8_in_place(&mut px);
    assert!((i16::from(px[0]) - 200).abs() <= 1);
    assert!((i16::from(px[1]) - 100).abs() <= 1);
    assert!((i16::from(px[2]) - 50).abs() <= 1);
    assert_eq!(px[3], 128);
}
