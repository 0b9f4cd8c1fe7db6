use super::*;
use crate::foundation::core::Rgba8;

fn raster_with_alpha(w: u32, h: u32, alpha: impl Fn(u32, u32) -> u8) -> Raster {
    Raster::from_fn(w, h, |x, y| Rgba8::new(0, 0, 0, alpha(x, y))).unwrap()
}

#[test]
fn threshold_is_inclusive() {
    let r = raster_with_alpha(3, 1, |x, _| [127, 128, 129][x as usize]);
    let m = AlphaMask::from_raster(&r, 128);
    assert!(!m.is_solid(0, 0));
    assert!(m.is_solid(1, 0));
    assert!(m.is_solid(2, 0));
    assert_eq!(m.solid_count(), 2);
}

#[test]
fn out_of_raster_is_empty() {
    let r = raster_with_alpha(2, 2, |_, _| 255);
    let m = AlphaMask::from_raster(&r, 1);
    assert!(m.is_solid(0, 0));
    assert!(!m.is_solid(-1, 0));
    assert!(!m.is_solid(2, 1));
}

#[test]
fn bounds_are_tight_with_max_minus_min_extent() {
    let r = raster_with_alpha(10, 8, |x, y| {
        if (2..=6).contains(&x) && (3..=4).contains(&y) {
            255
        } else {
            0
        }
    });
    let b = AlphaMask::from_raster(&r, 128).bounds().unwrap();
    assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (2, 3, 6, 4));
    assert_eq!((b.width(), b.height(), b.area()), (4, 1, 4));
}

#[test]
fn transparent_raster_has_no_bounds_and_single_pixel_has_zero_area() {
    let empty = raster_with_alpha(4, 4, |_, _| 0);
    assert!(AlphaMask::from_raster(&empty, 128).bounds().is_none());

    let single = raster_with_alpha(4, 4, |x, y| if x == 1 && y == 2 { 255 } else { 0 });
    let b = AlphaMask::from_raster(&single, 128).bounds().unwrap();
    assert_eq!(b.area(), 0);
}

#[test]
fn float_alpha_plane_uses_same_threshold() {
    let m = AlphaMask::from_alpha_f32(3, 1, &[0.0, 0.5, 1.0], 128).unwrap();
    assert!(!m.is_solid(0, 0));
    assert!(!m.is_solid(1, 0));
    assert!(m.is_solid(2, 0));
    assert!(AlphaMask::from_alpha_f32(3, 1, &[0.0], 128).is_err());
}
