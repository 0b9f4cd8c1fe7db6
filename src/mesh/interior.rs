use crate::{
    foundation::{core::Point, math::Rng64},
    mesh::mask::{AlphaMask, MaskBounds},
};

/// Grid oversampling that compensates for samples rejected outside the mask.
const OVERSAMPLE: f64 = 1.5;
/// Jitter amplitude as a fraction of grid spacing.
const JITTER: f64 = 0.25;

/// Vertex count that yields roughly `triangle_count` triangles (`t ≈ 2v − 5`).
pub fn target_vertex_count(triangle_count: u32) -> usize {
    (u64::from(triangle_count) + 5).div_ceil(2) as usize
}

/// Fill the solid interior with a jittered grid, topping up `boundary_count` to the target.
///
/// Sampling is driven by a seeded generator so the same inputs always produce the same points.
pub fn sample_interior(
    mask: &AlphaMask,
    bounds: MaskBounds,
    triangle_count: u32,
    boundary_count: usize,
    seed: u64,
) -> Vec<Point> {
    let needed = target_vertex_count(triangle_count).saturating_sub(boundary_count);
    let area = bounds.area() as f64;
    if needed == 0 || area <= 0.0 {
        return Vec::new();
    }

    let spacing = (area / (needed as f64 * OVERSAMPLE)).sqrt().max(1.0);
    let jitter = spacing * JITTER;
    let (x0, y0) = (f64::from(bounds.min_x), f64::from(bounds.min_y));
    let (x1, y1) = (f64::from(bounds.max_x), f64::from(bounds.max_y));

    let mut rng = Rng64::new(seed);
    let mut out = Vec::with_capacity(needed);
    let mut y = y0 + spacing / 2.0;
    while y <= y1 && out.len() < needed {
        let mut x = x0 + spacing / 2.0;
        while x <= x1 && out.len() < needed {
            let p = Point::new(
                x + rng.next_signed() * jitter,
                y + rng.next_signed() * jitter,
            );
            if mask.is_solid(p.x.round() as i64, p.y.round() as i64) {
                out.push(p);
            }
            x += spacing;
        }
        y += spacing;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/mesh/interior.rs"]
mod tests;
