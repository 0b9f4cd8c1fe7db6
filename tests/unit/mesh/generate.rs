use super::*;
use crate::foundation::core::Rgba8;

fn opaque_square(size: u32) -> Raster {
    Raster::from_fn(size, size, |_, _| Rgba8::new(200, 100, 50, 255)).unwrap()
}

#[test]
fn sanitized_clamps_practical_ranges() {
    let p = MeshParams {
        triangle_count: 5,
        expansion: 500.0,
        min_boundary_spacing: f64::NAN,
        ..MeshParams::default()
    }
    .sanitized();
    assert_eq!(p.triangle_count, 50);
    assert_eq!(p.expansion, 50.0);
    assert_eq!(p.min_boundary_spacing, MeshParams::default().min_boundary_spacing);
}

#[test]
fn validate_rejects_non_finite() {
    let p = MeshParams {
        expansion: f64::INFINITY,
        ..MeshParams::default()
    };
    assert!(p.validate().is_err());
    assert!(MeshParams::default().validate().is_ok());
}

#[test]
fn dedup_keeps_first_occurrence() {
    let pts = dedup_points(
        [
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(1.0, 1.0),
            Point::new(1.0000001, 1.0),
        ]
        .into_iter(),
    );
    assert_eq!(pts, vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)]);
}

#[test]
fn opaque_square_scenario() {
    let mesh = generate_mesh(
        &opaque_square(100),
        &MeshParams {
            triangle_count: 200,
            expansion: 0.0,
            alpha_threshold: 128,
            ..MeshParams::default()
        },
    );
    assert!(!mesh.is_fallback());
    assert!(mesh.vertex_count() > 3);
    mesh.validate().unwrap();
    let b = mesh.bounds();
    assert!(b.x.abs() <= 5.0 && b.y.abs() <= 5.0);
    assert!((b.w - 100.0).abs() <= 5.0 && (b.h - 100.0).abs() <= 5.0);
    for t in 0..mesh.triangle_count() {
        assert!(mesh.triangle_area(t) > 0.001);
    }
}

#[test]
fn generation_is_deterministic() {
    let r = opaque_square(64);
    let p = MeshParams::default();
    assert_eq!(generate_mesh(&r, &p), generate_mesh(&r, &p));
}

#[test]
fn float_mask_path_matches_raster_path() {
    let r = opaque_square(48);
    let alpha: Vec<f32> = r.alpha_values().map(|a| f32::from(a) / 255.0).collect();
    let mask = AlphaMask::from_alpha_f32(48, 48, &alpha, 128).unwrap();
    let p = MeshParams::default();
    assert_eq!(generate_mesh_from_mask(&mask, &p), generate_mesh(&r, &p));
}
