use super::*;

#[test]
fn rng_is_deterministic_per_seed() {
    let mut a = Rng64::new(7);
    let mut b = Rng64::new(7);
    let mut c = Rng64::new(8);
    let xs: Vec<u64> = (0..4).map(|_| a.next_u64()).collect();
    let ys: Vec<u64> = (0..4).map(|_| b.next_u64()).collect();
    let zs: Vec<u64> = (0..4).map(|_| c.next_u64()).collect();
    assert_eq!(xs, ys);
    assert_ne!(xs, zs);
}

#[test]
fn rng_signed_stays_in_range() {
    let mut r = Rng64::new(1);
    for _ in 0..1000 {
        let v = r.next_signed();
        assert!((-1.0..1.0).contains(&v));
    }
}

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn barycentric_of_vertices_and_centroid() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(10.0, 0.0);
    let c = Point::new(0.0, 10.0);

    let w = barycentric(a, a, b, c).unwrap();
    assert!((w[0] - 1.0).abs() < 1e-12 && w[1].abs() < 1e-12 && w[2].abs() < 1e-12);

    let centroid = Point::new(10.0 / 3.0, 10.0 / 3.0);
    let w = barycentric(centroid, a, b, c).unwrap();
    for wi in w {
        assert!((wi - 1.0 / 3.0).abs() < 1e-9);
    }

    let outside = barycentric(Point::new(20.0, 20.0), a, b, c).unwrap();
    assert!(outside.iter().any(|&wi| wi < 0.0));
}

#[test]
fn barycentric_rejects_collinear() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(5.0, 5.0);
    let c = Point::new(10.0, 10.0);
    assert!(barycentric(Point::new(1.0, 1.0), a, b, c).is_none());
    assert_eq!(signed_area2(a, b, c), 0.0);
}
