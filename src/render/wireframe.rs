use crate::{
    assets::raster::Raster,
    foundation::core::{Point, Rgba8},
    mesh::delaunay::Triangle,
    render::composite::blend_max_alpha,
};

/// Edges longer than this are treated as runaway geometry and skipped.
const MAX_LINE_STEPS: f64 = 65_536.0;

/// Stroke every triangle edge of `points`/`triangles` onto `dst` with 1px lines.
pub fn draw_wireframe(dst: &mut Raster, points: &[Point], triangles: &[Triangle], color: Rgba8) {
    for &[a, b, c] in triangles {
        for (i, j) in [(a, b), (b, c), (c, a)] {
            // Each shared edge is drawn once.
            if i > j && shares_edge(triangles, i, j) {
                continue;
            }
            draw_line(dst, points[i], points[j], color);
        }
    }
}

fn shares_edge(triangles: &[Triangle], i: usize, j: usize) -> bool {
    triangles.iter().filter(|t| t.contains(&i) && t.contains(&j)).count() > 1
}

/// DDA line with per-pixel clipping.
fn draw_line(dst: &mut Raster, a: Point, b: Point, color: Rgba8) {
    if !(a.x.is_finite() && a.y.is_finite() && b.x.is_finite() && b.y.is_finite()) {
        return;
    }
    let d = b - a;
    let steps = d.x.abs().max(d.y.abs()).ceil().max(1.0);
    if steps > MAX_LINE_STEPS {
        return;
    }
    let n = steps as u32;
    for s in 0..=n {
        let p = a + d * (f64::from(s) / steps);
        let (x, y) = (p.x.round(), p.y.round());
        if x < 0.0 || y < 0.0 || x >= f64::from(dst.width()) || y >= f64::from(dst.height()) {
            continue;
        }
        let (x, y) = (x as u32, y as u32);
        let px = blend_max_alpha(dst.pixel(x, y).to_array(), color.to_array());
        dst.put_pixel(x, y, Rgba8::from_array(px));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/wireframe.rs"]
mod tests;
