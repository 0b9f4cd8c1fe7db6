use super::*;

fn grid(n: usize, step: f64) -> Vec<Point> {
    (0..n * n)
        .map(|i| Point::new((i % n) as f64 * step, (i / n) as f64 * step))
        .collect()
}

#[test]
fn no_pins_gives_empty_table() {
    let t = calculate_weights(&grid(3, 1.0), &[], &WeightParams::default());
    assert!(t.as_slice().is_empty());
    assert_eq!(t.pin_count(), 0);
}

#[test]
fn table_has_v_times_p_entries_and_unit_rows() {
    let verts = grid(6, 4.0);
    let pins = vec![
        Pin::new("a", PinKind::Position, Point::new(0.0, 0.0), 15.0),
        Pin::new("b", PinKind::Bend, Point::new(20.0, 20.0), 15.0),
        Pin::new("c", PinKind::Rotation, Point::new(10.0, 0.0), 8.0),
    ];
    let t = calculate_weights(&verts, &pins, &WeightParams::default());
    assert_eq!(t.as_slice().len(), verts.len() * pins.len());
    for v in 0..verts.len() {
        let sum: f64 = t.row(v).iter().sum();
        assert!(sum == 0.0 || (sum - 1.0).abs() < 1e-3, "row {v} sums to {sum}");
    }
}

#[test]
fn coincident_vertex_dominates() {
    let verts = vec![Point::new(10.0, 10.0)];
    let pins = vec![
        Pin::new("a", PinKind::Position, Point::new(10.0, 10.0), 20.0),
        Pin::new("b", PinKind::Position, Point::new(12.0, 10.0), 20.0),
    ];
    let t = calculate_weights(&verts, &pins, &WeightParams::default());
    assert!(t.get(0, 0) > 0.999);
}

#[test]
fn inverse_distance_cuts_off_at_radius() {
    assert_eq!(
        falloff_weight(FalloffMethod::InverseDistance, 10.0, 10.0, 2.0),
        0.0
    );
    let w = falloff_weight(FalloffMethod::InverseDistance, 5.0, 10.0, 2.0);
    assert!((w - 0.25).abs() < 1e-12);
}

#[test]
fn radial_basis_is_gaussian() {
    let at_sigma = falloff_weight(FalloffMethod::RadialBasis, 10.0, 30.0, 2.0);
    assert!((at_sigma - (-0.5f64).exp()).abs() < 1e-12);
    assert_eq!(falloff_weight(FalloffMethod::RadialBasis, 0.0, 30.0, 2.0), 1.0);
}

#[test]
fn far_vertices_get_zero_rows() {
    let verts = vec![Point::new(100.0, 100.0)];
    let pins = vec![Pin::new("a", PinKind::Position, Point::ZERO, 10.0)];
    for falloff in [FalloffMethod::InverseDistance, FalloffMethod::RadialBasis] {
        let t = calculate_weights(
            &verts,
            &pins,
            &WeightParams {
                falloff,
                ..WeightParams::default()
            },
        );
        assert_eq!(t.row(0), &[0.0]);
    }
}

#[test]
fn starch_column_is_zero_and_damps_neighbors() {
    let verts = vec![Point::new(5.0, 0.0)];
    let position = Pin::new("p", PinKind::Position, Point::new(0.0, 0.0), 20.0);
    let starch = Pin::new("s", PinKind::Starch, Point::new(5.0, 0.0), 10.0).with_stiffness(1.0);

    let raw = WeightParams {
        normalize: false,
        ..WeightParams::default()
    };
    let undamped = calculate_weights(&verts, std::slice::from_ref(&position), &raw).get(0, 0);
    let damped = calculate_weights(&verts, &[position, starch], &raw);
    assert_eq!(damped.get(0, 1), 0.0);
    // Vertex sits on a full-stiffness starch pin: all influence suppressed.
    assert!(damped.get(0, 0) < undamped);
    assert_eq!(damped.get(0, 0), 0.0);
}

#[test]
fn unusable_pins_contribute_nothing() {
    let verts = vec![Point::new(1.0, 1.0)];
    let pins = vec![
        Pin::new("ok", PinKind::Position, Point::new(0.0, 0.0), 10.0),
        Pin::new("bad", PinKind::Position, Point::new(1.0, 1.0), 0.0),
    ];
    let t = calculate_weights(&verts, &pins, &WeightParams::default());
    assert_eq!(t.get(0, 1), 0.0);
    assert!((t.get(0, 0) - 1.0).abs() < 1e-12);
}

#[test]
fn power_is_clamped() {
    let p = WeightParams {
        power: 9.0,
        ..WeightParams::default()
    }
    .sanitized();
    assert_eq!(p.power, 5.0);
}
