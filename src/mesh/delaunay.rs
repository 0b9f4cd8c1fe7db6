//! Bowyer-Watson incremental Delaunay triangulation.

use crate::foundation::{
    core::Point,
    math::{DEGENERATE_EPS, signed_area2},
};

/// Super-triangle margin, in bounding-box diagonals.
const SUPER_MARGIN: f64 = 1000.0;

/// Vertex index triple into the input point slice.
pub type Triangle = [usize; 3];

/// Triangulate `points`, returning counter-clockwise (y-up) index triples.
///
/// Fewer than three points yield no triangles. Degenerate triangles are never emitted; a
/// pathological point set may therefore come back with holes or empty.
pub fn triangulate(points: &[Point]) -> Vec<Triangle> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    let mut verts = points.to_vec();
    verts.extend(super_triangle(points));

    let mut triangles: Vec<Triangle> = vec![[n, n + 1, n + 2]];
    let mut bad: Vec<usize> = Vec::new();
    let mut hole: Vec<(usize, usize)> = Vec::new();

    for i in 0..n {
        let p = verts[i];

        bad.clear();
        bad.extend(
            triangles
                .iter()
                .enumerate()
                .filter(|(_, t)| in_circumcircle(&verts, t, p))
                .map(|(ti, _)| ti),
        );
        if bad.is_empty() {
            continue;
        }

        hole.clear();
        for (k, &ti) in bad.iter().enumerate() {
            let t = triangles[ti];
            for e in 0..3 {
                let edge = (t[e], t[(e + 1) % 3]);
                let shared = bad
                    .iter()
                    .enumerate()
                    .any(|(j, &tj)| j != k && has_edge(&triangles[tj], edge));
                if !shared {
                    hole.push(edge);
                }
            }
        }

        // `bad` is ascending, so removing back-to-front keeps earlier indices valid.
        for &ti in bad.iter().rev() {
            triangles.swap_remove(ti);
        }

        for &(a, b) in &hole {
            if signed_area2(verts[a], verts[b], p).abs() < DEGENERATE_EPS {
                continue;
            }
            triangles.push([a, b, i]);
        }
    }

    triangles
        .into_iter()
        .filter(|t| t.iter().all(|&v| v < n))
        .filter_map(|t| orient_ccw(points, t))
        .collect()
}

/// Triangle enclosing every point with a [`SUPER_MARGIN`] clearance.
///
/// Super vertices must stay outside the circumcircles of thin hull triangles,
/// otherwise those triangles are dropped along with the super vertices.
fn super_triangle(points: &[Point]) -> [Point; 3] {
    let (mut x0, mut y0) = (f64::INFINITY, f64::INFINITY);
    let (mut x1, mut y1) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        x0 = x0.min(p.x);
        y0 = y0.min(p.y);
        x1 = x1.max(p.x);
        y1 = y1.max(p.y);
    }
    let delta = SUPER_MARGIN * (x1 - x0).hypot(y1 - y0).max(1.0);
    [
        Point::new(x0 - delta, y0 - delta),
        Point::new((x0 + x1) / 2.0, y1 + delta),
        Point::new(x1 + delta, y0 - delta),
    ]
}

fn has_edge(t: &Triangle, (a, b): (usize, usize)) -> bool {
    (0..3).any(|e| {
        let (u, v) = (t[e], t[(e + 1) % 3]);
        (u == a && v == b) || (u == b && v == a)
    })
}

/// Strict in-circle test whose sign is corrected for the triangle's winding.
///
/// Degenerate triangles never report containment.
fn in_circumcircle(verts: &[Point], t: &Triangle, p: Point) -> bool {
    let (a, b, c) = (verts[t[0]], verts[t[1]], verts[t[2]]);
    let orient = signed_area2(a, b, c);
    if orient.abs() < DEGENERATE_EPS {
        return false;
    }

    let (adx, ady) = (a.x - p.x, a.y - p.y);
    let (bdx, bdy) = (b.x - p.x, b.y - p.y);
    let (cdx, cdy) = (c.x - p.x, c.y - p.y);
    let det = (adx * adx + ady * ady) * (bdx * cdy - cdx * bdy)
        - (bdx * bdx + bdy * bdy) * (adx * cdy - cdx * ady)
        + (cdx * cdx + cdy * cdy) * (adx * bdy - bdx * ady);

    if orient > 0.0 { det > 0.0 } else { det < 0.0 }
}

fn orient_ccw(points: &[Point], t: Triangle) -> Option<Triangle> {
    let area2 = signed_area2(points[t[0]], points[t[1]], points[t[2]]);
    if area2.abs() < DEGENERATE_EPS {
        None
    } else if area2 > 0.0 {
        Some(t)
    } else {
        Some([t[0], t[2], t[1]])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mesh/delaunay.rs"]
mod tests;
