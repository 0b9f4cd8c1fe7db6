use super::*;

#[test]
fn bounds_from_points_uses_extents() {
    let b = Bounds::from_points(&[
        Point::new(4.0, 10.0),
        Point::new(-2.0, 3.0),
        Point::new(8.0, 5.0),
    ]);
    assert_eq!(b, Bounds::new(-2.0, 3.0, 10.0, 7.0));
    assert_eq!(b.area(), 70.0);
    assert_eq!(b.to_rect(), Rect::new(-2.0, 3.0, 8.0, 10.0));
}

#[test]
fn bounds_of_nothing_is_zero() {
    assert_eq!(Bounds::from_points(&[]), Bounds::default());
}

#[test]
fn rgba_array_roundtrip() {
    let c = Rgba8::new(1, 2, 3, 4);
    assert_eq!(Rgba8::from_array(c.to_array()), c);
}
