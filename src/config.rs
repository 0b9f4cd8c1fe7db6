use std::{collections::HashSet, fs::File, io::BufReader, path::Path};

use crate::{
    cache::fingerprint::FingerprintMode,
    foundation::error::{WarpError, WarpResult},
    mesh::generate::MeshParams,
    render::pipeline::WarpSettings,
    rig::{
        pin::{Pin, PinPoses, PinTransform},
        weights::WeightParams,
    },
};

/// One pin of a rig file: its rest geometry plus an optional posed transform.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PinSpec {
    /// Rest geometry.
    #[serde(flatten)]
    pub pin: Pin,
    /// Posed transform; absent means the pin stays at rest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<PinTransform>,
}

/// JSON-facing warp configuration: mesh and weight parameters plus a posed rig.
///
/// ```json
/// {
///   "mesh": { "triangle_count": 300, "expansion": 2 },
///   "weights": { "falloff": "radial_basis" },
///   "pins": [
///     { "id": "arm", "kind": "position", "rest": { "x": 40, "y": 60 }, "radius": 30,
///       "current": { "position": { "x": 52, "y": 48 } } }
///   ]
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WarpConfig {
    /// Mesh generation parameters.
    pub mesh: MeshParams,
    /// Pin weighting parameters.
    pub weights: WeightParams,
    /// Source fingerprinting for the mesh cache.
    pub fingerprint: FingerprintMode,
    /// Pins in weight-column order.
    pub pins: Vec<PinSpec>,
}

impl WarpConfig {
    /// Parse from a JSON string.
    pub fn from_json_str(s: &str) -> WarpResult<Self> {
        serde_json::from_str(s).map_err(|e| WarpError::serde(format!("parse warp config JSON: {e}")))
    }

    /// Parse from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> WarpResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| WarpError::serde(format!("parse warp config JSON: {e}")))
    }

    /// Parse from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> WarpResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            WarpError::validation(format!("open warp config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize as pretty JSON.
    pub fn to_json_string(&self) -> WarpResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| WarpError::serde(e.to_string()))
    }

    /// Reject duplicate pin ids and non-finite or out-of-range values.
    pub fn validate(&self) -> WarpResult<()> {
        self.mesh.validate()?;
        self.weights.validate()?;

        let mut seen = HashSet::new();
        for spec in &self.pins {
            spec.pin.validate()?;
            if !seen.insert(&spec.pin.id) {
                return Err(WarpError::validation(format!(
                    "duplicate pin id '{}'",
                    spec.pin.id.0
                )));
            }
            if let Some(t) = &spec.current {
                let finite = [t.position.x, t.position.y, t.rotation_deg, t.scale, t.in_front]
                    .iter()
                    .all(|v| v.is_finite());
                if !finite {
                    return Err(WarpError::validation(format!(
                        "pin '{}' has a non-finite current transform",
                        spec.pin.id.0
                    )));
                }
            }
        }
        Ok(())
    }

    /// Rest geometry of every pin, in order.
    pub fn rig(&self) -> Vec<Pin> {
        self.pins.iter().map(|s| s.pin.clone()).collect()
    }

    /// Posed transforms; pins without `current` are left out and therefore stay at rest.
    pub fn poses(&self) -> PinPoses {
        self.pins
            .iter()
            .filter_map(|s| s.current.map(|t| (s.pin.id.clone(), t)))
            .collect()
    }

    /// Pipeline settings carried by this config.
    pub fn settings(&self) -> WarpSettings {
        WarpSettings {
            mesh: self.mesh,
            weights: self.weights,
            fingerprint: self.fingerprint,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
