use crate::{
    foundation::{
        core::{Bounds, Point},
        error::{WarpError, WarpResult},
        math::signed_area2,
    },
    mesh::delaunay::Triangle,
};

/// Cells per side of the full-image fallback grid.
pub const FALLBACK_GRID_CELLS: usize = 4;

/// Immutable triangulated mesh in source raster pixel space.
///
/// Created once per cache key and replaced (never mutated) on regeneration.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    vertices: Vec<Point>,
    triangles: Vec<Triangle>,
    bounds: Bounds,
    fallback: bool,
}

/// Summary of a mesh for logging, debug overlays and the CLI.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct MeshStats {
    /// Number of vertices.
    pub vertex_count: usize,
    /// Number of triangles.
    pub triangle_count: usize,
    /// Vertex extents.
    pub bounds: Bounds,
    /// Whether the full-image grid fallback was used.
    pub fallback: bool,
}

impl Mesh {
    pub(crate) fn new(vertices: Vec<Point>, triangles: Vec<Triangle>) -> Self {
        let bounds = Bounds::from_points(&vertices);
        Self {
            vertices,
            triangles,
            bounds,
            fallback: false,
        }
    }

    /// Fixed 4×4-cell grid (25 vertices, 32 triangles) covering the whole raster.
    pub fn fallback_grid(width: u32, height: u32) -> Self {
        let n = FALLBACK_GRID_CELLS;
        let (w, h) = (f64::from(width), f64::from(height));
        let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
        for j in 0..=n {
            for i in 0..=n {
                vertices.push(Point::new(
                    w * i as f64 / n as f64,
                    h * j as f64 / n as f64,
                ));
            }
        }
        let mut triangles = Vec::with_capacity(n * n * 2);
        for j in 0..n {
            for i in 0..n {
                let a = j * (n + 1) + i;
                let b = a + 1;
                let c = a + n + 1;
                let d = c + 1;
                triangles.push([a, b, d]);
                triangles.push([a, d, c]);
            }
        }
        Self {
            vertices,
            triangles,
            bounds: Bounds::new(0.0, 0.0, w, h),
            fallback: true,
        }
    }

    /// Vertex positions.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Triangles as index triples into [`Mesh::vertices`].
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Vertex extents `{x, y, w, h}`.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// `true` when this is the full-image grid fallback.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Corner positions of triangle `t`.
    pub fn triangle_points(&self, t: usize) -> [Point; 3] {
        let [a, b, c] = self.triangles[t];
        [self.vertices[a], self.vertices[b], self.vertices[c]]
    }

    /// Unsigned area of triangle `t`.
    pub fn triangle_area(&self, t: usize) -> f64 {
        let [a, b, c] = self.triangle_points(t);
        signed_area2(a, b, c).abs() / 2.0
    }

    /// Counts, bounds and fallback flag.
    pub fn stats(&self) -> MeshStats {
        MeshStats {
            vertex_count: self.vertex_count(),
            triangle_count: self.triangle_count(),
            bounds: self.bounds,
            fallback: self.fallback,
        }
    }

    /// Check index range, duplicate-index and vertex-count invariants.
    pub fn validate(&self) -> WarpResult<()> {
        if !self.triangles.is_empty() && self.vertices.len() < 3 {
            return Err(WarpError::validation(
                "mesh with triangles needs at least 3 vertices",
            ));
        }
        for (ti, t) in self.triangles.iter().enumerate() {
            if let Some(&v) = t.iter().find(|&&v| v >= self.vertices.len()) {
                return Err(WarpError::validation(format!(
                    "triangle {ti} references invalid vertex index {v}"
                )));
            }
            if t[0] == t[1] || t[1] == t[2] || t[0] == t[2] {
                return Err(WarpError::validation(format!(
                    "triangle {ti} has duplicate vertex indices"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mesh/model.rs"]
mod tests;
