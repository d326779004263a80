//! Errors raised while building or loading a scene description.

use thiserror::Error;

/// A scene description that breaks one of the invariants the renderer
/// relies on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("sphere {index}: radius must be positive, got {radius}")]
    InvalidRadius { index: usize, radius: f32 },

    #[error("{surface}: reflectiveness must be within [0, 1], got {value}")]
    InvalidReflectiveness { surface: String, value: f32 },

    #[error("{surface}: fuzziness must not be negative, got {value}")]
    NegativeFuzziness { surface: String, value: f32 },

    #[error("ground plane normal has zero length")]
    DegenerateNormal,

    #[error("ground plane normal must be unit length, got length {0}")]
    NonUnitNormal(f32),

    #[error("{0} contains a non-finite value")]
    NonFinite(String),

    #[error("image must be at least 1x1, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("image of {width}x{height} has too many pixels")]
    ImageTooLarge { width: u32, height: u32 },

    #[error("samples per pixel must be at least 1")]
    NoSamples,

    #[error("max trace depth must be at least 1")]
    ZeroDepth,

    #[error("bucket size must be at least 1")]
    ZeroBucketSize,

    #[error("direct light weights must be finite and non-negative, got {bounce_weight}/{light_weight}")]
    InvalidBlend { bounce_weight: f32, light_weight: f32 },
}

/// Result type for validation.
pub type SceneResult<T> = Result<T, SceneError>;

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scene: {0}")]
    Invalid(#[from] SceneError),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;
