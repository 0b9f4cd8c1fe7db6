use super::*;
use crate::rig::{
    pin::{Pin, PinTransform, resolve_pins},
    weights::{WeightParams, calculate_weights},
};

fn grid_mesh() -> Mesh {
    Mesh::fallback_grid(100, 100)
}

fn state(kind: PinKind, rest: Point, current: PinTransform) -> PinState {
    PinState {
        kind,
        rest,
        radius: 30.0,
        current,
    }
}

fn transform(position: Point, rotation_deg: f64, scale: f64) -> PinTransform {
    PinTransform {
        position,
        rotation_deg,
        scale,
        in_front: 0.0,
    }
}

#[test]
fn zero_pins_is_identity() {
    let mesh = grid_mesh();
    let d = deform_mesh(&mesh, &WeightTable::default(), &[]);
    assert_eq!(d.points(), mesh.vertices());
}

#[test]
fn coincident_vertex_follows_single_pin() {
    let mesh = grid_mesh();
    let pin = Pin::new("p", PinKind::Position, Point::new(50.0, 50.0), 30.0);
    let weights = calculate_weights(mesh.vertices(), std::slice::from_ref(&pin), &WeightParams::default());
    let pose = |p: &Pin, _t: f64| Some(PinTransform::moved(p, Point::new(62.0, 41.0)));
    let pins = resolve_pins(std::slice::from_ref(&pin), &pose, 0.0);

    let d = deform_mesh(&mesh, &weights, &pins);
    let center = mesh
        .vertices()
        .iter()
        .position(|&v| v == Point::new(50.0, 50.0))
        .unwrap();
    let moved = d.points()[center];
    assert!((moved.x - 62.0).abs() < 1e-9 && (moved.y - 41.0).abs() < 1e-9);
}

#[test]
fn rotation_pin_rotates_about_rest() {
    let s = state(
        PinKind::Rotation,
        Point::new(10.0, 10.0),
        transform(Point::new(10.0, 10.0), 90.0, 1.0),
    );
    let d = pin_displacement(Point::new(20.0, 10.0), &s);
    // (10, 0) rotated by 90 degrees is (0, 10).
    assert!((d.x - -10.0).abs() < 1e-9 && (d.y - 10.0).abs() < 1e-9);
}

#[test]
fn bend_scales_and_ignores_translation() {
    let s = state(
        PinKind::Bend,
        Point::ZERO,
        transform(Point::new(100.0, 100.0), 0.0, 2.0),
    );
    let d = pin_displacement(Point::new(3.0, 4.0), &s);
    assert!((d.x - 3.0).abs() < 1e-12 && (d.y - 4.0).abs() < 1e-12);
}

#[test]
fn advanced_combines_all_components() {
    let s = state(
        PinKind::Advanced,
        Point::ZERO,
        transform(Point::new(1.0, 2.0), 0.0, 1.5),
    );
    let d = pin_displacement(Point::new(2.0, 0.0), &s);
    assert!((d.x - 2.0).abs() < 1e-12 && (d.y - 2.0).abs() < 1e-12);
}

#[test]
fn starch_and_overlap_do_not_move_vertices() {
    for kind in [PinKind::Starch, PinKind::Overlap] {
        let s = state(kind, Point::ZERO, transform(Point::new(9.0, 9.0), 45.0, 3.0));
        assert_eq!(pin_displacement(Point::new(5.0, 5.0), &s), Vec2::ZERO);
    }
}

#[test]
fn mismatched_weights_leave_mesh_at_rest() {
    let mesh = grid_mesh();
    let s = state(
        PinKind::Position,
        Point::ZERO,
        transform(Point::new(5.0, 0.0), 0.0, 1.0),
    );
    let d = deform_mesh(&mesh, &WeightTable::default(), &[s]);
    assert_eq!(d.points(), mesh.vertices());
}

#[test]
fn centroid_and_area_follow_deformed_points() {
    let mesh = grid_mesh();
    let d = DeformedMesh::rest(&mesh);
    assert_eq!(d.triangle_area(&mesh, 0), mesh.triangle_area(0));
    let c = d.triangle_centroid(&mesh, 0);
    let [a, b, cc] = mesh.triangle_points(0);
    assert!((c.x - (a.x + b.x + cc.x) / 3.0).abs() < 1e-12);
}
