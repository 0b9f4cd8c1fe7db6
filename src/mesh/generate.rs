use std::collections::HashSet;

use crate::{
    assets::raster::Raster,
    foundation::{
        core::Point,
        error::{WarpError, WarpResult},
    },
    mesh::{
        boundary::{expand_boundary, extract_boundary},
        delaunay::triangulate,
        interior::sample_interior,
        mask::AlphaMask,
        model::Mesh,
    },
};

/// Parameters that fully determine a generated mesh for a given raster.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MeshParams {
    /// Approximate number of triangles to aim for (practical range 50–1000).
    pub triangle_count: u32,
    /// Outward push applied to boundary points in pixels (0–50).
    pub expansion: f64,
    /// Alpha at or above which a pixel is solid.
    pub alpha_threshold: u8,
    /// Minimum spacing between accepted boundary points in pixels (2–20).
    pub min_boundary_spacing: f64,
    /// Seed for interior jitter.
    pub seed: u64,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            triangle_count: 200,
            expansion: 0.0,
            alpha_threshold: 128,
            min_boundary_spacing: 5.0,
            seed: 0x6d65_7368_7761_7270,
        }
    }
}

impl MeshParams {
    /// Reject values that cannot be clamped into a meaningful range.
    pub fn validate(&self) -> WarpResult<()> {
        if !self.expansion.is_finite() {
            return Err(WarpError::validation("mesh expansion must be finite"));
        }
        if !self.min_boundary_spacing.is_finite() || self.min_boundary_spacing <= 0.0 {
            return Err(WarpError::validation(
                "mesh min_boundary_spacing must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// Copy clamped to the practical ranges; non-finite values fall back to defaults.
    pub fn sanitized(&self) -> Self {
        let d = Self::default();
        Self {
            triangle_count: self.triangle_count.clamp(50, 1000),
            expansion: if self.expansion.is_finite() {
                self.expansion.clamp(0.0, 50.0)
            } else {
                d.expansion
            },
            alpha_threshold: self.alpha_threshold,
            min_boundary_spacing: if self.min_boundary_spacing.is_finite() {
                self.min_boundary_spacing.clamp(2.0, 20.0)
            } else {
                d.min_boundary_spacing
            },
            seed: self.seed,
        }
    }
}

/// Run the full silhouette-to-mesh pipeline on `raster`'s alpha channel.
///
/// Never fails: empty or degenerate silhouettes and failed triangulations return
/// [`Mesh::fallback_grid`].
pub fn generate_mesh(raster: &Raster, params: &MeshParams) -> Mesh {
    let mask = AlphaMask::from_raster(raster, params.sanitized().alpha_threshold);
    generate_mesh_from_mask(&mask, params)
}

/// Same as [`generate_mesh`] for a precomputed mask.
#[tracing::instrument(skip(mask), fields(width = mask.width(), height = mask.height()))]
pub fn generate_mesh_from_mask(mask: &AlphaMask, params: &MeshParams) -> Mesh {
    let params = params.sanitized();
    let fallback = |reason: &str| {
        tracing::debug!(reason, "using full-image fallback mesh");
        Mesh::fallback_grid(mask.width(), mask.height())
    };

    let Some(bounds) = mask.bounds().filter(|b| b.area() > 0) else {
        return fallback("empty or zero-area alpha region");
    };

    let boundary = extract_boundary(mask, bounds, params.min_boundary_spacing);
    let boundary = expand_boundary(&boundary, mask, params.expansion);
    let interior = sample_interior(
        mask,
        bounds,
        params.triangle_count,
        boundary.len(),
        params.seed,
    );

    let points = dedup_points(boundary.iter().chain(interior.iter()).copied());
    if points.len() < 3 {
        return fallback("fewer than 3 mesh points");
    }

    let triangles = triangulate(&points);
    if triangles.is_empty() {
        return fallback("triangulation produced no triangles");
    }

    let mesh = Mesh::new(points, triangles);
    tracing::debug!(
        boundary = boundary.len(),
        interior = interior.len(),
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "generated mesh"
    );
    mesh
}

/// Drop points that coincide (to 1/1000 px) with an earlier one.
fn dedup_points(points: impl Iterator<Item = Point>) -> Vec<Point> {
    let mut seen = HashSet::new();
    points
        .filter(|p| seen.insert(((p.x * 1000.0).round() as i64, (p.y * 1000.0).round() as i64)))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/mesh/generate.rs"]
mod tests;
