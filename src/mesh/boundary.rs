use crate::{
    foundation::core::{Point, Vec2},
    mesh::mask::{AlphaMask, MaskBounds},
};

/// How many recently accepted points a boundary candidate is checked against.
pub(crate) const SPACING_WINDOW: usize = 20;

/// Half-size of the neighborhood sampled for outward normals.
pub(crate) const NORMAL_RADIUS: i64 = 3;

const DEGENERATE_NORMAL: f64 = 0.001;

/// Solid pixels touching an empty 4-neighbor (or the raster edge), thinned in scan order.
///
/// A candidate is kept only when it is farther than `min_spacing` from each of the last
/// [`SPACING_WINDOW`] accepted points. Zero-area bounds yield no points.
pub fn extract_boundary(mask: &AlphaMask, bounds: MaskBounds, min_spacing: f64) -> Vec<Point> {
    if bounds.area() == 0 {
        return Vec::new();
    }
    let min_d2 = min_spacing * min_spacing;
    let mut out: Vec<Point> = Vec::new();

    for y in bounds.min_y..=bounds.max_y {
        for x in bounds.min_x..=bounds.max_x {
            let (xi, yi) = (i64::from(x), i64::from(y));
            if !mask.is_solid(xi, yi) || !is_edge_pixel(mask, xi, yi) {
                continue;
            }
            let p = Point::new(f64::from(x), f64::from(y));
            let window_start = out.len().saturating_sub(SPACING_WINDOW);
            let far_enough = out[window_start..]
                .iter()
                .all(|q| (p - *q).hypot2() > min_d2);
            if far_enough {
                out.push(p);
            }
        }
    }
    out
}

fn is_edge_pixel(mask: &AlphaMask, x: i64, y: i64) -> bool {
    !mask.is_solid(x - 1, y)
        || !mask.is_solid(x + 1, y)
        || !mask.is_solid(x, y - 1)
        || !mask.is_solid(x, y + 1)
}

/// Unit normal pointing away from the solid region around `p`.
///
/// Sums every offset in the `(2r+1)^2` neighborhood that lands on empty (or off-raster)
/// pixels. Falls back to straight up when the sum is too small to normalize.
pub fn outward_normal(mask: &AlphaMask, p: Point) -> Vec2 {
    let (px, py) = (p.x.round() as i64, p.y.round() as i64);
    let mut sum = Vec2::ZERO;
    for dy in -NORMAL_RADIUS..=NORMAL_RADIUS {
        for dx in -NORMAL_RADIUS..=NORMAL_RADIUS {
            if !mask.is_solid(px + dx, py + dy) {
                sum += Vec2::new(dx as f64, dy as f64);
            }
        }
    }
    let len = sum.hypot();
    if len < DEGENERATE_NORMAL {
        return Vec2::new(0.0, -1.0);
    }
    sum / len
}

/// Push each boundary point `expansion` pixels along its outward normal, clamped to the raster.
pub fn expand_boundary(points: &[Point], mask: &AlphaMask, expansion: f64) -> Vec<Point> {
    if expansion <= 0.0 {
        return points.to_vec();
    }
    let max_x = f64::from(mask.width().saturating_sub(1));
    let max_y = f64::from(mask.height().saturating_sub(1));
    points
        .iter()
        .map(|&p| {
            let moved = p + outward_normal(mask, p) * expansion;
            Point::new(moved.x.clamp(0.0, max_x), moved.y.clamp(0.0, max_y))
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/mesh/boundary.rs"]
mod tests;
