use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

use crate::{
    assets::raster::Raster,
    cache::fingerprint::{FingerprintMode, MeshKey, WeightKey},
    mesh::{
        generate::{MeshParams, generate_mesh},
        model::Mesh,
    },
    rig::{
        pin::Pin,
        weights::{WeightParams, WeightTable, calculate_weights},
    },
};

/// Identifies one logical mesh owner (for example one effect instance on one layer).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerId(pub u64);

/// A generated mesh plus the weight table computed for it.
///
/// Entries are immutable; a rebuild swaps in a new `Arc` and readers holding the old one keep it.
#[derive(Debug)]
pub struct MeshCacheEntry {
    /// Generated mesh.
    pub mesh: Arc<Mesh>,
    /// Pin weights for `mesh`.
    pub weights: Arc<WeightTable>,
    /// Key the mesh was generated under.
    pub key: MeshKey,
    /// Key the weights were computed under.
    pub weight_key: WeightKey,
}

/// Lookup counters since construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeshCacheStats {
    /// Lookups served without any recomputation.
    pub hits: u64,
    /// Lookups that regenerated the mesh.
    pub misses: u64,
    /// Lookups that kept the mesh but recomputed weights.
    pub weight_rebuilds: u64,
}

type Slot = Arc<Mutex<Option<Arc<MeshCacheEntry>>>>;

/// Explicit per-owner memo of generated meshes and weights.
///
/// Each owner has its own slot lock, so regeneration for one owner never blocks another and
/// at most one regeneration per owner runs at a time.
#[derive(Debug, Default)]
pub struct MeshCache {
    slots: Mutex<HashMap<OwnerId, Slot>>,
    hits: AtomicU64,
    misses: AtomicU64,
    weight_rebuilds: AtomicU64,
}

impl MeshCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the entry for `owner`, regenerating the mesh and/or weights when stale.
    #[tracing::instrument(
        skip(self, owner, source, pins, mesh_params, weight_params),
        fields(owner = owner.0)
    )]
    pub fn get_or_build(
        &self,
        owner: OwnerId,
        source: &Raster,
        pins: &[Pin],
        mesh_params: &MeshParams,
        weight_params: &WeightParams,
        mode: FingerprintMode,
    ) -> Arc<MeshCacheEntry> {
        let mesh_params = mesh_params.sanitized();
        let weight_params = weight_params.sanitized();
        let key = MeshKey::new(source, &mesh_params, mode);
        let weight_key = WeightKey::new(pins, &weight_params);

        let slot = self.slot(owner);
        let mut guard = slot.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(entry) = guard.as_ref()
            && entry.key == key
        {
            if entry.weight_key == weight_key {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("mesh cache hit");
                return Arc::clone(entry);
            }

            self.weight_rebuilds.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(
                old_pins = entry.weight_key.pin_count,
                new_pins = weight_key.pin_count,
                "mesh cache weight rebuild"
            );
            let weights = calculate_weights(entry.mesh.vertices(), pins, &weight_params);
            let rebuilt = Arc::new(MeshCacheEntry {
                mesh: Arc::clone(&entry.mesh),
                weights: Arc::new(weights),
                key,
                weight_key,
            });
            *guard = Some(Arc::clone(&rebuilt));
            return rebuilt;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("mesh cache miss");
        let mesh = generate_mesh(source, &mesh_params);
        let weights = calculate_weights(mesh.vertices(), pins, &weight_params);
        let fresh = Arc::new(MeshCacheEntry {
            mesh: Arc::new(mesh),
            weights: Arc::new(weights),
            key,
            weight_key,
        });
        *guard = Some(Arc::clone(&fresh));
        fresh
    }

    /// Current entry for `owner` without building anything.
    pub fn get(&self, owner: OwnerId) -> Option<Arc<MeshCacheEntry>> {
        let slot = self
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&owner)
            .cloned()?;
        let guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
        guard.clone()
    }

    /// Drop the entry for `owner`. Returns whether one existed.
    pub fn remove(&self, owner: OwnerId) -> bool {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&owner)
            .is_some()
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&self) {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of owners with a slot.
    pub fn len(&self) -> usize {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether no owner has a slot.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the lookup counters.
    pub fn stats(&self) -> MeshCacheStats {
        MeshCacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            weight_rebuilds: self.weight_rebuilds.load(Ordering::Relaxed),
        }
    }

    fn slot(&self, owner: OwnerId) -> Slot {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(owner).or_default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cache/store.rs"]
mod tests;
