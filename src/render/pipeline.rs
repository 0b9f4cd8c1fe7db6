use std::sync::Arc;

use rayon::prelude::*;

use crate::{
    assets::raster::Raster,
    cache::{
        fingerprint::FingerprintMode,
        store::{MeshCache, MeshCacheEntry, OwnerId},
    },
    foundation::error::{WarpError, WarpResult},
    mesh::generate::MeshParams,
    render::{
        depth::{DrawOrder, sort_triangles},
        warp::{DepthBuffer, SilhouetteMask, rasterize_depth, rasterize_silhouette, warp_raster},
    },
    rig::{
        deform::{DeformedMesh, deform_mesh},
        pin::{Pin, PinEvaluator, PinState, resolve_pins},
        weights::WeightParams,
    },
};

/// Generation, weighting and cache-key settings for one warp instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WarpSettings {
    /// Mesh generation parameters.
    pub mesh: MeshParams,
    /// Pin weighting parameters.
    pub weights: WeightParams,
    /// How the source is fingerprinted for the mesh cache.
    pub fingerprint: FingerprintMode,
}

/// Everything produced by evaluating one frame.
#[derive(Clone, Debug)]
pub struct FrameOutput {
    /// Cache entry the frame was deformed from.
    pub entry: Arc<MeshCacheEntry>,
    /// Pin snapshot used for the frame.
    pub pins: Vec<PinState>,
    /// Deformed vertex positions.
    pub deformed: DeformedMesh,
    /// Triangle draw order.
    pub draw_order: DrawOrder,
    /// Warped output, same size as the source.
    pub raster: Raster,
}

/// Threading controls for [`evaluate_frames`].
#[derive(Clone, Debug, Default)]
pub struct FrameThreading {
    /// Evaluate frames on a rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

struct Posed {
    entry: Arc<MeshCacheEntry>,
    pins: Vec<PinState>,
    deformed: DeformedMesh,
    draw_order: DrawOrder,
}

fn pose_frame(
    cache: &MeshCache,
    owner: OwnerId,
    source: &Raster,
    pins: &[Pin],
    evaluator: &dyn PinEvaluator,
    time: f64,
    settings: &WarpSettings,
) -> Posed {
    let entry = cache.get_or_build(
        owner,
        source,
        pins,
        &settings.mesh,
        &settings.weights,
        settings.fingerprint,
    );
    let states = resolve_pins(pins, evaluator, time);
    let deformed = deform_mesh(&entry.mesh, &entry.weights, &states);
    let draw_order = sort_triangles(&entry.mesh, &deformed, &states);
    Posed {
        entry,
        pins: states,
        deformed,
        draw_order,
    }
}

/// Evaluate one frame: fetch (or build) the mesh, pose the pins, deform, sort and warp.
///
/// The result depends only on the arguments. Frames may be evaluated in any order, and
/// re-evaluating a time yields bit-identical vertices and pixels.
#[tracing::instrument(
    skip(cache, owner, source, pins, evaluator, settings),
    fields(owner = owner.0)
)]
pub fn evaluate_frame(
    cache: &MeshCache,
    owner: OwnerId,
    source: &Raster,
    pins: &[Pin],
    evaluator: &dyn PinEvaluator,
    time: f64,
    settings: &WarpSettings,
) -> FrameOutput {
    let posed = pose_frame(cache, owner, source, pins, evaluator, time, settings);
    let raster = warp_raster(source, &posed.entry.mesh, &posed.deformed, &posed.draw_order);
    FrameOutput {
        entry: posed.entry,
        pins: posed.pins,
        deformed: posed.deformed,
        draw_order: posed.draw_order,
        raster,
    }
}

/// Evaluate a batch of frames, returned in the order of `times`.
///
/// Parallel and serial evaluation produce identical outputs.
#[allow(clippy::too_many_arguments)]
pub fn evaluate_frames(
    cache: &MeshCache,
    owner: OwnerId,
    source: &Raster,
    pins: &[Pin],
    evaluator: &dyn PinEvaluator,
    times: &[f64],
    settings: &WarpSettings,
    threading: &FrameThreading,
) -> WarpResult<Vec<FrameOutput>> {
    let eval = |&t: &f64| evaluate_frame(cache, owner, source, pins, evaluator, t, settings);
    if !threading.parallel || times.len() < 2 {
        return Ok(times.iter().map(eval).collect());
    }

    let pool = build_thread_pool(threading.threads)?;
    // Warm the slot once so workers start from a hit instead of queueing on the slot lock.
    cache.get_or_build(
        owner,
        source,
        pins,
        &settings.mesh,
        &settings.weights,
        settings.fingerprint,
    );
    Ok(pool.install(|| times.par_iter().map(eval).collect()))
}

/// Depth target for one frame: the simulated overlap depth per covered pixel.
pub fn render_depth_frame(
    cache: &MeshCache,
    owner: OwnerId,
    source: &Raster,
    pins: &[Pin],
    evaluator: &dyn PinEvaluator,
    time: f64,
    settings: &WarpSettings,
) -> DepthBuffer {
    let posed = pose_frame(cache, owner, source, pins, evaluator, time, settings);
    rasterize_depth(
        source.width(),
        source.height(),
        &posed.entry.mesh,
        &posed.deformed,
        &posed.draw_order,
    )
}

/// Silhouette target for one frame: coverage of the deformed mesh.
pub fn render_silhouette_frame(
    cache: &MeshCache,
    owner: OwnerId,
    source: &Raster,
    pins: &[Pin],
    evaluator: &dyn PinEvaluator,
    time: f64,
    settings: &WarpSettings,
) -> SilhouetteMask {
    let posed = pose_frame(cache, owner, source, pins, evaluator, time, settings);
    rasterize_silhouette(
        source.width(),
        source.height(),
        &posed.entry.mesh,
        &posed.deformed,
    )
}

fn build_thread_pool(threads: Option<usize>) -> WarpResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(WarpError::validation(
            "frame threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| WarpError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
