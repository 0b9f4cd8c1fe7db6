use super::*;

#[test]
fn fallback_grid_shape() {
    let m = Mesh::fallback_grid(80, 40);
    assert!(m.is_fallback());
    assert_eq!(m.vertex_count(), 25);
    assert_eq!(m.triangle_count(), 32);
    assert_eq!(m.bounds(), Bounds::new(0.0, 0.0, 80.0, 40.0));
    m.validate().unwrap();

    let total: f64 = (0..m.triangle_count()).map(|t| m.triangle_area(t)).sum();
    assert!((total - 80.0 * 40.0).abs() < 1e-9);
}

#[test]
fn new_mesh_bounds_follow_vertices() {
    let m = Mesh::new(
        vec![
            Point::new(2.0, 3.0),
            Point::new(12.0, 3.0),
            Point::new(2.0, 9.0),
        ],
        vec![[0, 1, 2]],
    );
    assert!(!m.is_fallback());
    assert_eq!(m.bounds(), Bounds::new(2.0, 3.0, 10.0, 6.0));
    assert_eq!(m.triangle_area(0), 30.0);
    assert_eq!(m.stats().triangle_count, 1);
}

#[test]
fn validate_catches_bad_indices() {
    let pts = vec![Point::ZERO, Point::new(1.0, 0.0), Point::new(0.0, 1.0)];
    assert!(Mesh::new(pts.clone(), vec![[0, 1, 3]]).validate().is_err());
    assert!(Mesh::new(pts.clone(), vec![[0, 1, 1]]).validate().is_err());
    assert!(Mesh::new(pts, vec![[0, 1, 2]]).validate().is_ok());
}
