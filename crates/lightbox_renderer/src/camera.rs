//! Camera for ray generation.
//!
//! A pinhole at `position` looking through the focal plane z = 0. Image
//! coordinates are centred on (0, 0); the horizontal extent spans
//! [-0.5, 0.5] and the vertical extent is scaled by height / width.
//! Row 0 is the top of the image.

use crate::gen_f32;
use lightbox_core::SceneDescription;
use lightbox_math::{try_normalize_or, Ray, Vec2, Vec3};
use rand::RngCore;

/// Camera for generating rays into the scene.
#[derive(Clone, Debug)]
pub struct Camera {
    pub image_width: u32,
    pub image_height: u32,

    position: Vec3,

    /// Jitter rays within the pixel footprint
    jitter: bool,
}

impl Camera {
    /// Create a camera at `position` rendering a `width` x `height` image.
    pub fn new(position: Vec3, width: u32, height: u32) -> Self {
        Self {
            image_width: width,
            image_height: height,
            position,
            jitter: false,
        }
    }

    /// Camera described by a scene.
    pub fn from_description(desc: &SceneDescription) -> Self {
        Self::new(desc.camera.position, desc.settings.width, desc.settings.height)
            .with_jitter(desc.settings.jitter)
    }

    /// Enable or disable sub-pixel jitter.
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Map continuous pixel coordinates to focal-plane coordinates.
    pub fn image_coords(&self, px: f32, py: f32) -> Vec2 {
        let width = self.image_width as f32;
        let height = self.image_height as f32;
        Vec2::new(px / width - 0.5, (0.5 * height - py) / width)
    }

    /// Generate a ray through pixel (i, j). The direction is unit length.
    ///
    /// Without jitter every call returns the same ray through the pixel
    /// centre and no random numbers are drawn.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.jitter {
            sample_square(rng)
        } else {
            Vec2::ZERO
        };

        let st = self.image_coords(i as f32 + 0.5 + offset.x, j as f32 + 0.5 + offset.y);
        let target = Vec3::new(st.x, st.y, 0.0);
        let direction = try_normalize_or(target - self.position, -Vec3::Z);

        Ray::new(self.position, direction)
    }
}

/// Sample a random point in the unit square [-0.5, 0.5) x [-0.5, 0.5).
fn sample_square(rng: &mut dyn RngCore) -> Vec2 {
    Vec2::new(gen_f32(rng) - 0.5, gen_f32(rng) - 0.5)
}
