//! meshwarp deforms a raster image through a triangle mesh driven by animated control pins.
//!
//! The flow for one frame:
//!
//! - Generate a [`Mesh`] from the source alpha channel (boundary tracing, jittered interior
//!   sampling, Delaunay triangulation), memoized per owner in a [`MeshCache`]
//! - Weight every vertex against the pin rig ([`calculate_weights`])
//! - Pose the pins at a time ([`PinEvaluator`]) and deform the vertices ([`deform_mesh`])
//! - Order overlapping triangles ([`sort_triangles`]) and resample the source through each
//!   triangle ([`warp_raster`])
//!
//! [`evaluate_frame`] runs all of it. Given the same inputs it returns bit-identical output,
//! independent of which frames were evaluated before.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod cache;
/// JSON rig and parameter files.
pub mod config;
mod foundation;
mod mesh;
mod render;
mod rig;

pub use crate::foundation::core::{Affine, Bounds, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{WarpError, WarpResult};

pub use crate::assets::decode::{decode_image, load_image, save_luma_png, save_png};
pub use crate::assets::raster::Raster;

pub use crate::mesh::boundary::{expand_boundary, extract_boundary, outward_normal};
pub use crate::mesh::delaunay::{Triangle, triangulate};
pub use crate::mesh::generate::{MeshParams, generate_mesh, generate_mesh_from_mask};
pub use crate::mesh::interior::{sample_interior, target_vertex_count};
pub use crate::mesh::mask::{AlphaMask, MaskBounds};
pub use crate::mesh::model::{FALLBACK_GRID_CELLS, Mesh, MeshStats};

pub use crate::rig::deform::{DeformedMesh, deform_mesh, pin_displacement};
pub use crate::rig::pin::{
    Pin, PinEvaluator, PinId, PinKind, PinPoses, PinState, PinTransform, RestPose, resolve_pins,
};
pub use crate::rig::weights::{
    COINCIDENT_WEIGHT, FalloffMethod, WeightParams, WeightTable, calculate_weights,
    falloff_weight,
};

pub use crate::render::composite::{Rgba8Px, bilinear_mix, blend_max_alpha};
pub use crate::render::depth::{DrawOrder, sort_triangles};
pub use crate::render::pipeline::{
    FrameOutput, FrameThreading, WarpSettings, evaluate_frame, evaluate_frames,
    render_depth_frame, render_silhouette_frame,
};
pub use crate::render::warp::{
    DepthBuffer, SilhouetteMask, rasterize_depth, rasterize_silhouette, sample_bilinear,
    warp_into, warp_raster,
};
pub use crate::render::wireframe::draw_wireframe;

pub use crate::cache::fingerprint::{ContentFingerprint, FingerprintMode, MeshKey, WeightKey};
pub use crate::cache::store::{MeshCache, MeshCacheEntry, MeshCacheStats, OwnerId};

pub use crate::config::{PinSpec, WarpConfig};
