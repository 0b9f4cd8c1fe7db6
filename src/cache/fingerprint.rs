use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::Xxh3;

use crate::{
    assets::raster::Raster,
    mesh::generate::MeshParams,
    rig::{
        pin::Pin,
        weights::{FalloffMethod, WeightParams},
    },
};

const XXH3_SEED: u64 = 0x3c6e_f372_fe94_f82b;

/// Sample grid edge length used by [`FingerprintMode::Sparse`].
const SPARSE_GRID: u32 = 3;

/// How much of the source alpha channel feeds the content fingerprint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FingerprintMode {
    /// Dimensions plus a 3×3 grid of alpha samples. Cheap, but edits between sample points
    /// are not detected.
    #[default]
    Sparse,
    /// Dimensions plus every alpha byte.
    Full,
}

/// Stable 128-bit digest of a source raster's shape-relevant content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContentFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

impl ContentFingerprint {
    /// Fingerprint `raster` under `mode`.
    pub fn of(raster: &Raster, mode: FingerprintMode) -> Self {
        let mut h = StableHasher::new();
        h.write_u32(raster.width());
        h.write_u32(raster.height());
        match mode {
            FingerprintMode::Sparse => {
                h.write_u8(0);
                for (x, y) in sparse_sample_points(raster.width(), raster.height()) {
                    h.write_u8(raster.alpha(x, y));
                }
            }
            FingerprintMode::Full => {
                h.write_u8(1);
                for a in raster.alpha_values() {
                    h.write_u8(a);
                }
            }
        }
        h.finish()
    }
}

/// Corners, edge midpoints and center of the raster.
fn sparse_sample_points(width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
    let at = |len: u32, i: u32| (len - 1) * i / (SPARSE_GRID - 1);
    (0..SPARSE_GRID).flat_map(move |j| (0..SPARSE_GRID).map(move |i| (at(width, i), at(height, j))))
}

/// Everything that decides the generated [`Mesh`](crate::Mesh) for a source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshKey {
    /// Source content digest.
    pub fingerprint: ContentFingerprint,
    /// Requested triangle count.
    pub triangle_count: u32,
    /// Boundary expansion in pixels.
    pub expansion: f64,
    /// Alpha solidity threshold.
    pub alpha_threshold: u8,
    /// Boundary point spacing.
    pub min_boundary_spacing: f64,
    /// Interior jitter seed.
    pub seed: u64,
}

impl MeshKey {
    /// Key for `source` generated with (already sanitized) `params`.
    pub fn new(source: &Raster, params: &MeshParams, mode: FingerprintMode) -> Self {
        Self {
            fingerprint: ContentFingerprint::of(source, mode),
            triangle_count: params.triangle_count,
            expansion: params.expansion,
            alpha_threshold: params.alpha_threshold,
            min_boundary_spacing: params.min_boundary_spacing,
            seed: params.seed,
        }
    }
}

/// Digest of the pin geometry and weight parameters a [`WeightTable`](crate::WeightTable)
/// was computed from.
///
/// Animated pin transforms are not part of the key; only rest geometry is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WeightKey {
    /// Number of pins (the weight table's row width).
    pub pin_count: usize,
    /// Digest over kinds, rest positions, radii, stiffness and weight params.
    pub digest: ContentFingerprint,
}

impl WeightKey {
    /// Key for `pins` under `params`.
    pub fn new(pins: &[Pin], params: &WeightParams) -> Self {
        let mut h = StableHasher::new();
        h.write_u64(pins.len() as u64);
        for p in pins {
            h.write_u8(p.kind.as_u8());
            h.write_f64(p.rest.x);
            h.write_f64(p.rest.y);
            h.write_f64(p.radius);
            h.write_f64(p.stiffness);
        }
        write_falloff(&mut h, params.falloff);
        h.write_f64(params.power);
        h.write_bool(params.normalize);
        Self {
            pin_count: pins.len(),
            digest: h.finish(),
        }
    }
}

fn write_falloff(h: &mut StableHasher, f: FalloffMethod) {
    h.write_u8(match f {
        FalloffMethod::InverseDistance => 0,
        FalloffMethod::RadialBasis => 1,
    });
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn finish(self) -> ContentFingerprint {
        let v = self.inner.digest128();
        ContentFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cache/fingerprint.rs"]
mod tests;
