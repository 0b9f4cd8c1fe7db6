use rayon::prelude::*;

use crate::{
    foundation::{
        core::{Affine, Point, Vec2},
        math::signed_area2,
    },
    mesh::model::Mesh,
    rig::{
        pin::{PinKind, PinState},
        weights::WeightTable,
    },
};

/// Per-frame vertex positions aligned with a [`Mesh`]'s vertex indices.
#[derive(Clone, Debug, PartialEq)]
pub struct DeformedMesh {
    points: Vec<Point>,
}

impl DeformedMesh {
    /// Undeformed copy of `mesh`'s vertices.
    pub fn rest(mesh: &Mesh) -> Self {
        Self {
            points: mesh.vertices().to_vec(),
        }
    }

    /// Wrap externally computed positions; the caller keeps them aligned with the mesh.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Deformed vertex positions.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Consume into the vertex buffer.
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Deformed corners of `mesh` triangle `t`.
    pub fn triangle_points(&self, mesh: &Mesh, t: usize) -> [Point; 3] {
        let [a, b, c] = mesh.triangles()[t];
        [self.points[a], self.points[b], self.points[c]]
    }

    /// Deformed centroid of triangle `t`.
    pub fn triangle_centroid(&self, mesh: &Mesh, t: usize) -> Point {
        let [a, b, c] = self.triangle_points(mesh, t);
        Point::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0)
    }

    /// Deformed unsigned area of triangle `t`.
    pub fn triangle_area(&self, mesh: &Mesh, t: usize) -> f64 {
        let [a, b, c] = self.triangle_points(mesh, t);
        signed_area2(a, b, c).abs() / 2.0
    }
}

/// Displace every vertex by the weighted sum of per-pin displacements.
///
/// Pure in its inputs: the same mesh, weights and pin snapshot always produce the same
/// positions, regardless of evaluation history. With no pins this is the identity.
pub fn deform_mesh(mesh: &Mesh, weights: &WeightTable, pins: &[PinState]) -> DeformedMesh {
    if pins.is_empty() {
        return DeformedMesh::rest(mesh);
    }
    if weights.pin_count() != pins.len() || weights.vertex_count() != mesh.vertex_count() {
        tracing::warn!(
            weight_pins = weights.pin_count(),
            pins = pins.len(),
            weight_rows = weights.vertex_count(),
            vertices = mesh.vertex_count(),
            "weight table does not match mesh/pins, leaving mesh at rest"
        );
        return DeformedMesh::rest(mesh);
    }

    let points = mesh
        .vertices()
        .par_iter()
        .enumerate()
        .map(|(v, &p)| {
            let offset = weights
                .row(v)
                .iter()
                .zip(pins)
                .filter(|(w, _)| **w != 0.0)
                .fold(Vec2::ZERO, |acc, (&w, pin)| {
                    acc + pin_displacement(p, pin) * w
                });
            p + offset
        })
        .collect();

    DeformedMesh { points }
}

/// Unweighted displacement `pin` applies to a vertex at `p`.
pub fn pin_displacement(p: Point, pin: &PinState) -> Vec2 {
    let rel = p - pin.rest;
    let delta = pin.current.position - pin.rest;
    let rotated = || {
        let turn = Affine::rotate(pin.current.rotation_deg.to_radians());
        (turn * rel.to_point()).to_vec2() - rel
    };
    let scaled = || rel * (pin.current.scale - 1.0);

    match pin.kind {
        PinKind::Position => delta,
        PinKind::Rotation => rotated(),
        PinKind::Bend => rotated() + scaled(),
        PinKind::Advanced => delta + rotated() + scaled(),
        PinKind::Starch | PinKind::Overlap => Vec2::ZERO,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/rig/deform.rs"]
mod tests;
