use super::*;

#[test]
fn new_rejects_mismatched_length() {
    assert!(Raster::new(2, 2, vec![0; 15]).is_err());
    assert!(Raster::new(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn zero_dimensions_are_invalid() {
    assert!(Raster::transparent(0, 4).is_err());
    assert!(Raster::new(4, 0, vec![]).is_err());
}

#[test]
fn put_and_read_pixels() {
    let mut r = Raster::transparent(3, 2).unwrap();
    r.put_pixel(2, 1, Rgba8::new(10, 20, 30, 40));
    assert_eq!(r.pixel(2, 1), Rgba8::new(10, 20, 30, 40));
    assert_eq!(r.alpha(2, 1), 40);
    assert_eq!(r.alpha(0, 0), 0);
    assert_eq!(r.alpha_values().filter(|&a| a > 0).count(), 1);
}

#[test]
fn image_bridge_preserves_bytes() {
    let r = Raster::from_fn(4, 3, |x, y| Rgba8::new(x as u8, y as u8, 7, 255)).unwrap();
    let img = r.to_image().unwrap();
    assert_eq!(img.dimensions(), (4, 3));
    let back = Raster::from_image(img).unwrap();
    assert_eq!(back, r);
}
