use thiserror::Error;

/// Top-level error type for the snapping subsystem.
///
/// Only configuration and view construction can fail; the distance kernel
/// and the snap pipeline itself are total.
#[derive(Debug, Error)]
pub enum SnapError {
    #[error(transparent)]
    View(#[from] ViewError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Errors raised while building a [`ViewState`](crate::view::ViewState).
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("model-to-view transform is not invertible")]
    SingularTransform,

    #[error("view size must be positive and finite, got {0}")]
    InvalidSize(f64),

    #[error("view pixel dimensions must be non-zero, got {width}x{height}")]
    ZeroPixelSize { width: u32, height: u32 },
}

/// Errors related to snap configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("snap tolerance factor must be finite and non-negative, got {0}")]
    InvalidToleranceFactor(f64),

    #[error("line width must be finite and non-negative, got {0}")]
    InvalidLineWidth(f64),
}

/// Errors related to the line-source store.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("line source not found")]
    SourceNotFound,
}

/// Convenience type alias for results using [`SnapError`].
pub type Result<T> = std::result::Result<T, SnapError>;
