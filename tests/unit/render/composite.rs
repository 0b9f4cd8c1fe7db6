use super::*;

#[test]
fn transparent_src_is_noop() {
    let dst = [10, 20, 30, 40];
    assert_eq!(blend_max_alpha(dst, [255, 255, 255, 0]), dst);
}

#[test]
fn opaque_src_replaces_color() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(blend_max_alpha(dst, src), src);
}

#[test]
fn alpha_takes_max() {
    let out = blend_max_alpha([0, 0, 0, 200], [255, 255, 255, 100]);
    assert_eq!(out[3], 200);
    let out = blend_max_alpha([0, 0, 0, 20], [255, 255, 255, 100]);
    assert_eq!(out[3], 100);
}

#[test]
fn half_alpha_blends_color_halfway() {
    let out = blend_max_alpha([0, 0, 0, 255], [255, 255, 255, 128]);
    assert!((i32::from(out[0]) - 128).abs() <= 1);
}

#[test]
fn onto_transparent_keeps_src_color() {
    let src = [200, 100, 50, 128];
    assert_eq!(blend_max_alpha([0, 0, 0, 0], src), src);
    assert_eq!(blend_max_alpha([9, 9, 9, 0], src), src);
}

#[test]
fn repeated_translucent_color_is_stable() {
    let px = [200, 100, 50, 128];
    let once = blend_max_alpha([0, 0, 0, 0], px);
    assert_eq!(blend_max_alpha(once, px), px);
}

#[test]
fn translucent_over_translucent_stays_straight() {
    let out = blend_max_alpha([0, 0, 255, 128], [255, 0, 0, 128]);
    assert_eq!(out[3], 128);
    // Both layers are visible, neither is darkened toward black.
    assert!(out[0] > 128 && out[2] > 64);
    assert!(u16::from(out[0]) + u16::from(out[2]) >= 250);
}

#[test]
fn bilinear_of_identical_texels_is_that_texel() {
    let px = [40, 80, 120, 200];
    assert_eq!(bilinear_mix([px; 4], [0.1, 0.2, 0.3, 0.4]), px);
}

#[test]
fn bilinear_ignores_color_of_transparent_texels() {
    let red = [255, 0, 0, 255];
    let clear_black = [0, 0, 0, 0];
    let out = bilinear_mix([red, clear_black, red, clear_black], [0.25; 4]);
    assert_eq!(&out[..3], &[255, 0, 0]);
    assert!((i32::from(out[3]) - 128).abs() <= 1);
}
