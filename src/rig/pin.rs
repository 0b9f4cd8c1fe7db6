use std::collections::HashMap;

use crate::foundation::{
    core::Point,
    error::{WarpError, WarpResult},
};

/// Stable pin identifier supplied by the host application.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PinId(pub String);

impl PinId {
    /// Build an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// Which deformation components a pin drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinKind {
    /// Translates nearby vertices.
    Position,
    /// Rotates and scales around the pin.
    Bend,
    /// Rotates around the pin.
    Rotation,
    /// Stiffens the mesh locally; never moves vertices itself.
    Starch,
    /// Affects triangle draw order only.
    Overlap,
    /// Translation, rotation and scale.
    Advanced,
}

impl PinKind {
    pub(crate) fn as_u8(self) -> u8 {
        match self {
            Self::Position => 0,
            Self::Bend => 1,
            Self::Rotation => 2,
            Self::Starch => 3,
            Self::Overlap => 4,
            Self::Advanced => 5,
        }
    }
}

/// Rest geometry of a control pin.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Pin {
    /// Identifier used to look up the pin's animated transform.
    pub id: PinId,
    /// Pin type.
    pub kind: PinKind,
    /// Rest position in source raster pixel space.
    pub rest: Point,
    /// Influence radius in pixels.
    pub radius: f64,
    /// Starch strength in `[0, 1]`.
    #[serde(default)]
    pub stiffness: f64,
    /// Default depth for overlap pins (higher draws in front).
    #[serde(default)]
    pub in_front: f64,
}

impl Pin {
    /// Pin with zero stiffness and zero `in_front`.
    pub fn new(id: impl Into<String>, kind: PinKind, rest: Point, radius: f64) -> Self {
        Self {
            id: PinId::new(id),
            kind,
            rest,
            radius,
            stiffness: 0.0,
            in_front: 0.0,
        }
    }

    /// Builder-style stiffness setter.
    pub fn with_stiffness(mut self, stiffness: f64) -> Self {
        self.stiffness = stiffness;
        self
    }

    /// Builder-style `in_front` setter.
    pub fn with_in_front(mut self, in_front: f64) -> Self {
        self.in_front = in_front;
        self
    }

    /// Whether the rest geometry can carry weight at all.
    pub(crate) fn has_usable_geometry(&self) -> bool {
        self.rest.x.is_finite()
            && self.rest.y.is_finite()
            && self.radius.is_finite()
            && self.radius > 0.0
    }

    /// Strict checks used when loading rigs from configuration.
    pub fn validate(&self) -> WarpResult<()> {
        if !self.has_usable_geometry() {
            return Err(WarpError::validation(format!(
                "pin '{}' needs a finite rest position and a radius > 0",
                self.id.0
            )));
        }
        if !(0.0..=1.0).contains(&self.stiffness) {
            return Err(WarpError::validation(format!(
                "pin '{}' stiffness must be in [0, 1]",
                self.id.0
            )));
        }
        if !self.in_front.is_finite() {
            return Err(WarpError::validation(format!(
                "pin '{}' in_front must be finite",
                self.id.0
            )));
        }
        Ok(())
    }
}

/// A pin's evaluated transform at one point in time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PinTransform {
    /// Current position.
    pub position: Point,
    /// Current rotation in degrees.
    #[serde(default)]
    pub rotation_deg: f64,
    /// Current uniform scale (1 = rest).
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Current depth for overlap pins.
    #[serde(default)]
    pub in_front: f64,
}

fn default_scale() -> f64 {
    1.0
}

impl PinTransform {
    /// The transform that leaves `pin` at rest.
    pub fn rest(pin: &Pin) -> Self {
        Self {
            position: pin.rest,
            rotation_deg: 0.0,
            scale: 1.0,
            in_front: pin.in_front,
        }
    }

    /// Rest transform moved to `position`.
    pub fn moved(pin: &Pin, position: Point) -> Self {
        Self {
            position,
            ..Self::rest(pin)
        }
    }

    fn is_finite(&self) -> bool {
        self.position.x.is_finite()
            && self.position.y.is_finite()
            && self.rotation_deg.is_finite()
            && self.scale.is_finite()
            && self.in_front.is_finite()
    }
}

/// Source of per-time pin transforms, supplied by the host's animation system.
///
/// Returning `None` marks the pin as missing at `time`; it then stays at rest.
pub trait PinEvaluator: Send + Sync {
    /// Evaluate `pin` at `time`.
    fn evaluate(&self, pin: &Pin, time: f64) -> Option<PinTransform>;
}

impl<F> PinEvaluator for F
where
    F: Fn(&Pin, f64) -> Option<PinTransform> + Send + Sync,
{
    fn evaluate(&self, pin: &Pin, time: f64) -> Option<PinTransform> {
        self(pin, time)
    }
}

/// Evaluator that keeps every pin at rest.
#[derive(Clone, Copy, Debug, Default)]
pub struct RestPose;

impl PinEvaluator for RestPose {
    fn evaluate(&self, pin: &Pin, _time: f64) -> Option<PinTransform> {
        Some(PinTransform::rest(pin))
    }
}

/// Time-independent snapshot of pin transforms keyed by id.
#[derive(Clone, Debug, Default)]
pub struct PinPoses {
    poses: HashMap<PinId, PinTransform>,
}

impl PinPoses {
    /// Empty snapshot; every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the transform for `id`.
    pub fn insert(&mut self, id: PinId, pose: PinTransform) {
        self.poses.insert(id, pose);
    }

    /// Transform for `id`, if any.
    pub fn get(&self, id: &PinId) -> Option<&PinTransform> {
        self.poses.get(id)
    }
}

impl FromIterator<(PinId, PinTransform)> for PinPoses {
    fn from_iter<I: IntoIterator<Item = (PinId, PinTransform)>>(iter: I) -> Self {
        Self {
            poses: iter.into_iter().collect(),
        }
    }
}

impl PinEvaluator for PinPoses {
    fn evaluate(&self, pin: &Pin, _time: f64) -> Option<PinTransform> {
        self.poses.get(&pin.id).copied()
    }
}

/// Read-only snapshot of every pin at one evaluation time.
#[derive(Clone, Debug, PartialEq)]
pub struct PinState {
    /// Pin type.
    pub kind: PinKind,
    /// Rest position.
    pub rest: Point,
    /// Influence radius.
    pub radius: f64,
    /// Evaluated transform (rest when missing or non-finite).
    pub current: PinTransform,
}

/// Evaluate all pins at `time`, aligned with `pins`.
pub fn resolve_pins(pins: &[Pin], evaluator: &dyn PinEvaluator, time: f64) -> Vec<PinState> {
    pins.iter()
        .map(|pin| {
            let current = match evaluator.evaluate(pin, time) {
                Some(t) if t.is_finite() => t,
                Some(_) => {
                    tracing::debug!(pin = %pin.id.0, time, "non-finite pin transform, using rest");
                    PinTransform::rest(pin)
                }
                None => PinTransform::rest(pin),
            };
            PinState {
                kind: pin.kind,
                rest: pin.rest,
                radius: pin.radius,
                current,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/rig/pin.rs"]
mod tests;
