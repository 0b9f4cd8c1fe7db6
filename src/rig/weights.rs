use crate::{
    foundation::{
        core::Point,
        error::{WarpError, WarpResult},
    },
    rig::pin::{Pin, PinKind},
};

/// Weight given to a vertex that sits on a pin, so it dominates normalization.
pub const COINCIDENT_WEIGHT: f64 = 1000.0;
const COINCIDENT_DIST: f64 = 0.001;
const MIN_ROW_TOTAL: f64 = 0.001;

/// Distance-to-influence curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FalloffMethod {
    /// `(1 - d/r)^power` inside the radius, zero outside.
    #[default]
    InverseDistance,
    /// Gaussian with `sigma = radius / 3`.
    RadialBasis,
}

/// Weighting configuration shared by every pin.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WeightParams {
    /// Falloff curve.
    pub falloff: FalloffMethod,
    /// Exponent for inverse-distance falloff (1–5).
    pub power: f64,
    /// Normalize each vertex row to sum to one.
    pub normalize: bool,
}

impl Default for WeightParams {
    fn default() -> Self {
        Self {
            falloff: FalloffMethod::InverseDistance,
            power: 2.0,
            normalize: true,
        }
    }
}

impl WeightParams {
    /// Reject a non-finite power.
    pub fn validate(&self) -> WarpResult<()> {
        if !self.power.is_finite() {
            return Err(WarpError::validation("weight power must be finite"));
        }
        Ok(())
    }

    /// Copy with `power` clamped to `[1, 5]`.
    pub fn sanitized(&self) -> Self {
        Self {
            power: if self.power.is_finite() {
                self.power.clamp(1.0, 5.0)
            } else {
                Self::default().power
            },
            ..*self
        }
    }
}

/// Per-vertex, per-pin influence stored row-major (`weights[v * pin_count + p]`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeightTable {
    vertex_count: usize,
    pin_count: usize,
    weights: Vec<f64>,
}

impl WeightTable {
    /// Number of rows.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Row width.
    pub fn pin_count(&self) -> usize {
        self.pin_count
    }

    /// Flat row-major weights; empty when there are no pins.
    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    /// Weights of every pin for vertex `v`.
    pub fn row(&self, v: usize) -> &[f64] {
        &self.weights[v * self.pin_count..(v + 1) * self.pin_count]
    }

    /// Weight of pin `p` on vertex `v`.
    pub fn get(&self, v: usize, p: usize) -> f64 {
        self.weights[v * self.pin_count + p]
    }
}

/// Raw falloff weight of a pin at distance `dist`.
pub fn falloff_weight(method: FalloffMethod, dist: f64, radius: f64, power: f64) -> f64 {
    match method {
        FalloffMethod::InverseDistance => {
            if dist < COINCIDENT_DIST {
                COINCIDENT_WEIGHT
            } else if dist < radius {
                (1.0 - dist / radius).powf(power)
            } else {
                0.0
            }
        }
        FalloffMethod::RadialBasis => {
            let sigma = radius / 3.0;
            (-(dist * dist) / (2.0 * sigma * sigma)).exp()
        }
    }
}

/// Compute the weight table for `vertices` against `pins`.
///
/// Starch pins get a zero column but damp every weight of vertices inside their radius by
/// `1 - stiffness * (1 - d/r)`. Pins with unusable geometry contribute nothing. Rows whose total
/// stays at or below 0.001 are zeroed; with normalization on, all other rows sum to one.
pub fn calculate_weights(vertices: &[Point], pins: &[Pin], params: &WeightParams) -> WeightTable {
    let params = params.sanitized();
    let pin_count = pins.len();
    if pin_count == 0 {
        return WeightTable {
            vertex_count: vertices.len(),
            pin_count: 0,
            weights: Vec::new(),
        };
    }

    let mut weights = vec![0.0; vertices.len() * pin_count];
    for (v, row) in vertices.iter().zip(weights.chunks_exact_mut(pin_count)) {
        fill_row(*v, pins, &params, row);
    }

    WeightTable {
        vertex_count: vertices.len(),
        pin_count,
        weights,
    }
}

fn fill_row(v: Point, pins: &[Pin], params: &WeightParams, row: &mut [f64]) {
    for (w, pin) in row.iter_mut().zip(pins) {
        *w = if pin.kind == PinKind::Starch || !pin.has_usable_geometry() {
            0.0
        } else {
            falloff_weight(params.falloff, (v - pin.rest).hypot(), pin.radius, params.power)
        };
    }

    for pin in pins {
        if pin.kind != PinKind::Starch || !pin.has_usable_geometry() || pin.stiffness <= 0.0 {
            continue;
        }
        let dist = (v - pin.rest).hypot();
        if dist < pin.radius {
            let damp = 1.0 - pin.stiffness.min(1.0) * (1.0 - dist / pin.radius);
            row.iter_mut().for_each(|w| *w *= damp);
        }
    }

    let total: f64 = row.iter().sum();
    if total <= MIN_ROW_TOTAL {
        row.fill(0.0);
    } else if params.normalize {
        row.iter_mut().for_each(|w| *w /= total);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/rig/weights.rs"]
mod tests;
