use crate::{
    assets::raster::Raster,
    foundation::{
        core::{Point, Rgba8},
        math::{DEGENERATE_EPS, barycentric, barycentric_denominator, signed_area2},
    },
    mesh::model::Mesh,
    render::{
        composite::{Rgba8Px, bilinear_mix, blend_max_alpha},
        depth::DrawOrder,
    },
    rig::deform::DeformedMesh,
};

/// Edge function of `p` against the directed edge `from -> to`.
///
/// Always evaluated from the lexicographically smaller endpoint, so two triangles
/// sharing an edge see exactly negated values.
fn edge_function(from: Point, to: Point, p: Point) -> f64 {
    if (from.x, from.y) <= (to.x, to.y) {
        signed_area2(from, to, p)
    } else {
        -signed_area2(to, from, p)
    }
}

/// Top-left fill rule for a positively wound triangle: a pixel exactly on an edge
/// belongs to the triangle for which that edge is a top or left edge.
fn owns_edge(from: Point, to: Point) -> bool {
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    dy < 0.0 || (dy == 0.0 && dx > 0.0)
}

/// Visit every pixel of a `width`×`height` target covered by triangle `tri`.
///
/// Pixels on a shared edge are visited for exactly one of the two triangles.
/// Degenerate triangles are skipped entirely and `false` is returned.
pub(crate) fn scan_triangle(
    width: u32,
    height: u32,
    tri: [Point; 3],
    mut visit: impl FnMut(u32, u32, [f64; 3]),
) -> bool {
    let [a, b, c] = tri;
    let denom = barycentric_denominator(a, b, c);
    if !denom.is_finite() || denom.abs() < DEGENERATE_EPS {
        return false;
    }

    let min_x = a.x.min(b.x).min(c.x).floor().max(0.0);
    let min_y = a.y.min(b.y).min(c.y).floor().max(0.0);
    let max_x = a.x.max(b.x).max(c.x).ceil().min(f64::from(width) - 1.0);
    let max_y = a.y.max(b.y).max(c.y).ceil().min(f64::from(height) - 1.0);
    if min_x > max_x || min_y > max_y {
        return true;
    }

    let edges = if signed_area2(a, b, c) > 0.0 {
        [(a, b), (b, c), (c, a)]
    } else {
        [(a, c), (c, b), (b, a)]
    };
    let owned = edges.map(|(from, to)| owns_edge(from, to));

    for y in (min_y as u32)..=(max_y as u32) {
        for x in (min_x as u32)..=(max_x as u32) {
            let p = Point::new(f64::from(x), f64::from(y));
            let inside = edges.iter().zip(owned).all(|(&(from, to), own)| {
                let e = edge_function(from, to, p);
                e > 0.0 || (e == 0.0 && own)
            });
            if !inside {
                continue;
            }
            let Some(w) = barycentric(p, a, b, c) else {
                return false;
            };
            visit(x, y, w);
        }
    }
    true
}

/// Bilinear sample of `source` at fractional coordinates, clamping to the edge texels.
pub fn sample_bilinear(source: &Raster, x: f64, y: f64) -> Rgba8Px {
    let max_x = f64::from(source.width() - 1);
    let max_y = f64::from(source.height() - 1);
    let (x, y) = (x.clamp(0.0, max_x), y.clamp(0.0, max_y));

    let (x0, y0) = (x.floor(), y.floor());
    let (fx, fy) = (x - x0, y - y0);
    let (x0, y0) = (x0 as u32, y0 as u32);
    let x1 = (x0 + 1).min(source.width() - 1);
    let y1 = (y0 + 1).min(source.height() - 1);

    bilinear_mix(
        [
            source.pixel(x0, y0).to_array(),
            source.pixel(x1, y0).to_array(),
            source.pixel(x0, y1).to_array(),
            source.pixel(x1, y1).to_array(),
        ],
        [
            (1.0 - fx) * (1.0 - fy),
            fx * (1.0 - fy),
            (1.0 - fx) * fy,
            fx * fy,
        ],
    )
}

/// Resample `source` through every source/deformed triangle pair into a fresh raster.
pub fn warp_raster(
    source: &Raster,
    mesh: &Mesh,
    deformed: &DeformedMesh,
    order: &DrawOrder,
) -> Raster {
    let mut out = source.blank_like();
    warp_into(&mut out, source, mesh, deformed, order);
    out
}

/// Like [`warp_raster`], compositing into an existing destination.
pub fn warp_into(
    dst: &mut Raster,
    source: &Raster,
    mesh: &Mesh,
    deformed: &DeformedMesh,
    order: &DrawOrder,
) {
    let (w, h) = (dst.width(), dst.height());
    let mut skipped = 0usize;
    for &t in order.order() {
        let [sa, sb, sc] = mesh.triangle_points(t);
        let covered = scan_triangle(w, h, deformed.triangle_points(mesh, t), |x, y, [w1, w2, w3]| {
            let sx = w1 * sa.x + w2 * sb.x + w3 * sc.x;
            let sy = w1 * sa.y + w2 * sb.y + w3 * sc.y;
            let sample = sample_bilinear(source, sx, sy);
            let blended = blend_max_alpha(dst.pixel(x, y).to_array(), sample);
            dst.put_pixel(x, y, Rgba8::from_array(blended));
        });
        if !covered {
            skipped += 1;
        }
    }
    if skipped > 0 {
        tracing::debug!(skipped, "skipped degenerate triangles while warping");
    }
}

/// Per-pixel simulated depth of the deformed triangles.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Depth per pixel; `0.0` where nothing is covered.
    pub depth: Vec<f32>,
    /// Whether any triangle covers the pixel.
    pub coverage: Vec<bool>,
}

impl DepthBuffer {
    /// Grayscale view: uncovered pixels are 0, covered depths map onto `64..=255`.
    pub fn to_luma8(&self) -> Vec<u8> {
        let covered = || {
            self.depth
                .iter()
                .zip(&self.coverage)
                .filter(|(_, c)| **c)
                .map(|(d, _)| *d)
        };
        let lo = covered().fold(f32::INFINITY, f32::min);
        let hi = covered().fold(f32::NEG_INFINITY, f32::max);
        let span = hi - lo;
        self.depth
            .iter()
            .zip(&self.coverage)
            .map(|(&d, &c)| match (c, span > 0.0) {
                (false, _) => 0,
                (true, false) => 255,
                (true, true) => (64.0 + (d - lo) / span * 191.0).round() as u8,
            })
            .collect()
    }
}

/// Rasterize triangle depths from [`DrawOrder::depths`]; nearer (larger) depth wins.
pub fn rasterize_depth(
    width: u32,
    height: u32,
    mesh: &Mesh,
    deformed: &DeformedMesh,
    order: &DrawOrder,
) -> DepthBuffer {
    let len = (width as usize) * (height as usize);
    let mut buf = DepthBuffer {
        width,
        height,
        depth: vec![0.0; len],
        coverage: vec![false; len],
    };
    for &t in order.order() {
        let d = order.depths()[t] as f32;
        scan_triangle(width, height, deformed.triangle_points(mesh, t), |x, y, _| {
            let i = (y as usize) * (width as usize) + (x as usize);
            if !buf.coverage[i] || d > buf.depth[i] {
                buf.depth[i] = d;
                buf.coverage[i] = true;
            }
        });
    }
    buf
}

/// Binary mask (`0` / `255`) of pixels covered by the deformed mesh.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SilhouetteMask {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// One byte per pixel.
    pub data: Vec<u8>,
}

impl SilhouetteMask {
    /// Number of covered pixels.
    pub fn covered_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }
}

/// Rasterize the deformed mesh as constant white on black.
pub fn rasterize_silhouette(
    width: u32,
    height: u32,
    mesh: &Mesh,
    deformed: &DeformedMesh,
) -> SilhouetteMask {
    let mut data = vec![0u8; (width as usize) * (height as usize)];
    for t in 0..mesh.triangle_count() {
        scan_triangle(width, height, deformed.triangle_points(mesh, t), |x, y, _| {
            data[(y as usize) * (width as usize) + (x as usize)] = 255;
        });
    }
    SilhouetteMask {
        width,
        height,
        data,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/warp.rs"]
mod tests;
