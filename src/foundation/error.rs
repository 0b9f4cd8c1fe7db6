/// Convenience result type used across meshwarp.
pub type WarpResult<T> = Result<T, WarpError>;

/// Error taxonomy for the input boundaries of the crate.
///
/// The mesh/deform/warp pipeline itself never fails once it holds a valid
/// [`Raster`](crate::Raster); degenerate geometry degrades to fallbacks instead.
#[derive(thiserror::Error, Debug)]
pub enum WarpError {
    /// Invalid user-provided raster, parameters or rig data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WarpError {
    /// Build a [`WarpError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WarpError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
