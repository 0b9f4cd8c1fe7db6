pub(crate) mod composite;
pub(crate) mod depth;
pub(crate) mod pipeline;
pub(crate) mod warp;
pub(crate) mod wireframe;
