//! Scene loading.
//!
//! Scenes are stored as JSON. Vectors are three-element arrays, and most
//! render settings may be omitted.
//!
//! ```json
//! {
//!   "camera": { "position": [0.0, 0.0, 1.0] },
//!   "spheres": [
//!     { "center": [0.0, 0.0, -2.7], "radius": 0.3,
//!       "material": { "albedo": [0.2, 0.7, 0.4], "reflectiveness": 0.08 } }
//!   ],
//!   "ground": { "point": [0.0, -0.3, 0.0], "normal": [0.0, 1.0, 0.0],
//!               "material": { "albedo": [0.128, 0.813, 0.291] } },
//!   "light": { "position": [-3.0, 10.0, 5.0], "intensity": [1.3, 1.3, 0.0] },
//!   "background": [0.705, 0.913, 0.98],
//!   "settings": { "width": 512, "height": 256, "samples_per_pixel": 64 }
//! }
//! ```

use std::path::Path;

use crate::error::{LoadError, LoadResult};
use crate::presets;
use crate::scene::SceneDescription;

/// Load a scene description from a JSON file.
///
/// The ground normal is renormalized and the result validated, so the
/// returned scene satisfies every invariant the renderer relies on.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<SceneDescription> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let scene = load_scene_from_str(&content)?;

    log::info!(
        "Loaded scene {} ({} spheres, {}x{} @ {} spp)",
        path.display(),
        scene.spheres.len(),
        scene.settings.width,
        scene.settings.height,
        scene.settings.samples_per_pixel
    );

    Ok(scene)
}

/// Load a scene description from a JSON string.
pub fn load_scene_from_str(content: &str) -> LoadResult<SceneDescription> {
    let scene: SceneDescription = serde_json::from_str(content)?;
    let scene = scene.normalized();
    scene.validate()?;
    Ok(scene)
}

/// Look up one of the built-in scenes by name.
pub fn load_preset(name: &str) -> LoadResult<SceneDescription> {
    let scene = presets::preset(name).ok_or_else(|| LoadError::UnknownPreset(name.to_string()))?;
    scene.validate()?;
    Ok(scene)
}
