use crate::{
    mesh::model::Mesh,
    rig::{
        deform::DeformedMesh,
        pin::{PinKind, PinState},
    },
};

/// Back-to-front triangle order plus the simulated depth of every triangle.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawOrder {
    order: Vec<usize>,
    depths: Vec<f64>,
}

impl DrawOrder {
    /// Triangulation order with all depths zero.
    pub fn identity(triangle_count: usize) -> Self {
        Self {
            order: (0..triangle_count).collect(),
            depths: vec![0.0; triangle_count],
        }
    }

    /// Triangle indices, first drawn first.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Depth per triangle index (not per draw position).
    pub fn depths(&self) -> &[f64] {
        &self.depths
    }
}

/// Order triangles by the `in_front` of nearby overlap pins, measured at deformed centroids.
///
/// Without overlap pins the triangulation order is kept. The sort is stable, so triangles of
/// equal depth keep their relative order.
pub fn sort_triangles(mesh: &Mesh, deformed: &DeformedMesh, pins: &[PinState]) -> DrawOrder {
    let overlap: Vec<&PinState> = pins
        .iter()
        .filter(|p| p.kind == PinKind::Overlap && p.radius.is_finite() && p.radius > 0.0)
        .collect();
    if overlap.is_empty() {
        return DrawOrder::identity(mesh.triangle_count());
    }

    let depths: Vec<f64> = (0..mesh.triangle_count())
        .map(|t| {
            let c = deformed.triangle_centroid(mesh, t);
            let (mut acc, mut total) = (0.0, 0.0);
            for pin in &overlap {
                let dist = (c - pin.current.position).hypot();
                if dist < pin.radius {
                    let w = 1.0 - dist / pin.radius;
                    acc += pin.current.in_front * w;
                    total += w;
                }
            }
            if total > 0.0 { acc / total } else { 0.0 }
        })
        .collect();

    let mut order: Vec<usize> = (0..depths.len()).collect();
    order.sort_by(|&a, &b| depths[a].total_cmp(&depths[b]));
    DrawOrder { order, depths }
}

#[cfg(test)]
#[path = "../../tests/unit/render/depth.rs"]
mod tests;
