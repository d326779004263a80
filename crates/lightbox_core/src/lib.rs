//! Lightbox Core - scene description for the lightbox path tracer.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDescription`, `SphereDesc`,
//!   `PlaneDesc`, `PointLight`, `Material`, `RenderSettings`
//! - **Validation** of the invariants the renderer relies on
//! - **Loading** from JSON and a small set of built-in presets
//!
//! # Example
//!
//! ```ignore
//! use lightbox_core::{load_scene, presets};
//!
//! let scene = load_scene("scene.json")?;
//! println!("Loaded {} spheres", scene.spheres.len());
//!
//! let reference = presets::lightbox();
//! assert!(reference.validate().is_ok());
//! ```

pub mod error;
pub mod loader;
pub mod material;
pub mod presets;
pub mod scene;

// Re-export commonly used types
pub use error::{LoadError, LoadResult, SceneError, SceneResult};
pub use loader::{load_preset, load_scene, load_scene_from_str};
pub use material::Material;
pub use scene::{
    CameraDesc, CosineMode, DirectLight, PlaneDesc, PointLight, RenderSettings, SceneDescription,
    SphereDesc, DEFAULT_BUCKET_SIZE,
};
