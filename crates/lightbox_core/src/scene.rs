//! Scene description types.
//!
//! A `SceneDescription` is everything the renderer needs for one frame:
//! the camera, the surfaces, the light, the background and the render
//! settings. It is plain data; `validate` checks the invariants and
//! `normalized` repairs the ones that can be repaired.

use lightbox_math::{Vec3, NORMALIZE_EPSILON};
use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};
use crate::material::Material;

/// Unit-length tolerance accepted by `validate` for the ground normal.
const UNIT_LENGTH_TOLERANCE: f32 = 1e-3;

/// Default bucket edge length in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

/// A sphere in the scene.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    pub center: Vec3,
    pub radius: f32,
    pub material: Material,
}

impl SphereDesc {
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

/// An infinite two-sided plane given by a point on it and its unit normal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaneDesc {
    pub point: Vec3,
    pub normal: Vec3,
    pub material: Material,
}

impl PlaneDesc {
    pub fn new(point: Vec3, normal: Vec3, material: Material) -> Self {
        Self {
            point,
            normal,
            material,
        }
    }
}

/// A point light. It contributes to every diffuse hit without an
/// occlusion test.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub position: Vec3,
    pub intensity: Vec3,
}

/// Pinhole camera. Rays leave `position` toward the focal plane z = 0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraDesc {
    pub position: Vec3,
}

impl Default for CameraDesc {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 1.0),
        }
    }
}

/// How the cosine factor `n . dir` is applied to bounce and light terms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CosineMode {
    /// Multiply by the raw dot product, negative values included
    #[default]
    Unclamped,
    /// Clamp the dot product to zero before multiplying
    Clamped,
}

impl CosineMode {
    /// Apply the mode to a raw cosine.
    #[inline]
    pub fn apply(self, cosine: f32) -> f32 {
        match self {
            CosineMode::Unclamped => cosine,
            CosineMode::Clamped => cosine.max(0.0),
        }
    }
}

/// Fixed-weight blend of the bounce term with the direct point-light term.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectLight {
    pub bounce_weight: f32,
    pub light_weight: f32,
}

impl DirectLight {
    pub fn new(bounce_weight: f32, light_weight: f32) -> Self {
        Self {
            bounce_weight,
            light_weight,
        }
    }

    /// Weighted sum of the two terms.
    #[inline]
    pub fn blend(&self, bounce: Vec3, light: Vec3) -> Vec3 {
        self.bounce_weight * bounce + self.light_weight * light
    }
}

impl Default for DirectLight {
    fn default() -> Self {
        Self::new(0.8, 0.2)
    }
}

fn default_width() -> u32 {
    1024
}

fn default_height() -> u32 {
    512
}

fn default_samples() -> u32 {
    160
}

fn default_max_depth() -> u32 {
    20
}

fn default_bucket_size() -> u32 {
    DEFAULT_BUCKET_SIZE
}

fn default_direct_light() -> Option<DirectLight> {
    Some(DirectLight::default())
}

/// Image and integrator settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Image width in pixels
    #[serde(default = "default_width")]
    pub width: u32,
    /// Image height in pixels
    #[serde(default = "default_height")]
    pub height: u32,
    /// Camera rays traced and averaged per pixel
    #[serde(default = "default_samples")]
    pub samples_per_pixel: u32,
    /// Path depth budget; reaching zero returns the background
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
    /// Base seed for the per-bucket random streams
    #[serde(default)]
    pub seed: u64,
    /// Edge length of the square tiles rendered in parallel
    #[serde(default = "default_bucket_size")]
    pub bucket_size: u32,
    /// Jitter camera rays within the pixel footprint
    #[serde(default)]
    pub jitter: bool,
    /// Direct-light blend; `None` renders bounce light only
    #[serde(default = "default_direct_light")]
    pub direct_light: Option<DirectLight>,
    /// Cosine handling for bounce and light terms
    #[serde(default)]
    pub cosine: CosineMode,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            samples_per_pixel: default_samples(),
            max_depth: default_max_depth(),
            seed: 0,
            bucket_size: default_bucket_size(),
            jitter: false,
            direct_light: default_direct_light(),
            cosine: CosineMode::default(),
        }
    }
}

impl RenderSettings {
    /// Check the settings invariants.
    pub fn validate(&self) -> SceneResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SceneError::EmptyImage {
                width: self.width,
                height: self.height,
            });
        }
        // Pixel counts and indices are kept in u32 arithmetic
        if self.width.checked_mul(self.height).is_none() {
            return Err(SceneError::ImageTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(SceneError::NoSamples);
        }
        if self.max_depth == 0 {
            return Err(SceneError::ZeroDepth);
        }
        if self.bucket_size == 0 {
            return Err(SceneError::ZeroBucketSize);
        }
        if let Some(blend) = self.direct_light {
            let valid = |w: f32| w.is_finite() && w >= 0.0;
            if !valid(blend.bounce_weight) || !valid(blend.light_weight) {
                return Err(SceneError::InvalidBlend {
                    bounce_weight: blend.bounce_weight,
                    light_weight: blend.light_weight,
                });
            }
        }
        Ok(())
    }
}

/// A complete, renderer-agnostic scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub camera: CameraDesc,

    #[serde(default)]
    pub spheres: Vec<SphereDesc>,

    /// The single ground plane
    pub ground: PlaneDesc,

    /// The single point light
    pub light: PointLight,

    /// Radiance returned by rays that escape or run out of depth
    pub background: Vec3,

    #[serde(default)]
    pub settings: RenderSettings,
}

impl SceneDescription {
    /// Create a scene with no spheres and default settings.
    pub fn new(ground: PlaneDesc, light: PointLight, background: Vec3) -> Self {
        Self {
            camera: CameraDesc::default(),
            spheres: Vec::new(),
            ground,
            light,
            background,
            settings: RenderSettings::default(),
        }
    }

    /// Add a sphere.
    pub fn with_sphere(mut self, sphere: SphereDesc) -> Self {
        self.spheres.push(sphere);
        self
    }

    /// Renormalize the ground normal. A zero-length normal is left for
    /// `validate` to reject.
    pub fn normalized(mut self) -> Self {
        let len = self.ground.normal.length();
        if len > NORMALIZE_EPSILON && (len - 1.0).abs() > f32::EPSILON {
            log::warn!("Ground normal has length {}, renormalizing", len);
            self.ground.normal /= len;
        }
        self
    }

    /// Check every invariant the renderer assumes.
    pub fn validate(&self) -> SceneResult<()> {
        if !self.camera.position.is_finite() {
            return Err(SceneError::NonFinite("camera".into()));
        }

        for (index, sphere) in self.spheres.iter().enumerate() {
            if !sphere.center.is_finite() || !sphere.radius.is_finite() {
                return Err(SceneError::NonFinite(format!("sphere {index}")));
            }
            if sphere.radius <= 0.0 {
                return Err(SceneError::InvalidRadius {
                    index,
                    radius: sphere.radius,
                });
            }
            sphere.material.validate(&format!("sphere {index}"))?;
        }

        if !self.ground.point.is_finite() || !self.ground.normal.is_finite() {
            return Err(SceneError::NonFinite("ground".into()));
        }
        let len = self.ground.normal.length();
        if len <= NORMALIZE_EPSILON {
            return Err(SceneError::DegenerateNormal);
        }
        if (len - 1.0).abs() > UNIT_LENGTH_TOLERANCE {
            return Err(SceneError::NonUnitNormal(len));
        }
        self.ground.material.validate("ground")?;

        if !self.light.position.is_finite() || !self.light.intensity.is_finite() {
            return Err(SceneError::NonFinite("light".into()));
        }
        if !self.background.is_finite() {
            return Err(SceneError::NonFinite("background".into()));
        }

        self.settings.validate()
    }
}
