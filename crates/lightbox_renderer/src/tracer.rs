//! Recursive radiance estimator.
//!
//! Each hit picks one of two continuations at random: a specular bounce
//! (with probability `reflectiveness`) along the fuzzed mirror direction, or
//! a diffuse bounce along a random direction in the normal's hemisphere.
//! The recursive result is tinted by the albedo and scaled by the cosine
//! between normal and bounce direction. Diffuse hits may also blend in an
//! unoccluded point-light term.

use crate::hittable::HitRecord;
use crate::scene::Scene;
use crate::{gen_f32, random_direction, Color};
use lightbox_core::{CosineMode, DirectLight, RenderSettings};
use lightbox_math::{reflect, try_normalize_or, Ray, Vec3};
use rand::RngCore;

/// Shading options that vary between scene variants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shading {
    /// Blend with the direct point-light term on diffuse hits
    pub direct_light: Option<DirectLight>,
    /// Whether negative cosines are clamped to zero
    pub cosine: CosineMode,
}

impl Default for Shading {
    fn default() -> Self {
        Self::from(&RenderSettings::default())
    }
}

impl From<&RenderSettings> for Shading {
    fn from(settings: &RenderSettings) -> Self {
        Self {
            direct_light: settings.direct_light,
            cosine: settings.cosine,
        }
    }
}

/// Path integrator over a read-only scene.
#[derive(Clone, Copy)]
pub struct Tracer<'a> {
    scene: &'a Scene,
    max_depth: u32,
    shading: Shading,
}

impl<'a> Tracer<'a> {
    pub fn new(scene: &'a Scene, max_depth: u32, shading: Shading) -> Self {
        Self {
            scene,
            max_depth,
            shading,
        }
    }

    /// Radiance along a camera ray, with the full depth budget.
    pub fn trace_ray(&self, ray: &Ray, rng: &mut dyn RngCore) -> Color {
        self.trace(ray.origin(), ray.direction(), self.max_depth, rng)
    }

    /// Radiance arriving at `origin` from `direction`, with `depth` bounces
    /// left. Depth zero, a miss, or a degenerate direction all return the
    /// background.
    pub fn trace(&self, origin: Vec3, direction: Vec3, depth: u32, rng: &mut dyn RngCore) -> Color {
        let background = self.scene.background();
        if depth == 0 {
            return background;
        }

        let Some(ray) = Ray::new(origin, direction).normalized() else {
            return background;
        };
        let Some(rec) = self.scene.closest_hit(&ray) else {
            return background;
        };

        // Candidate diffuse direction, flipped into the normal's hemisphere
        let mut diffuse_dir = random_direction(rng);
        if diffuse_dir.dot(rec.normal) < 0.0 {
            diffuse_dir = -diffuse_dir;
        }

        let material = rec.material;
        if gen_f32(rng) < material.reflectiveness {
            let mirror = reflect(ray.direction(), rec.normal);
            let fuzzed = mirror + material.fuzziness * random_direction(rng);
            let specular_dir = try_normalize_or(fuzzed, mirror);
            self.bounce(&rec, specular_dir, depth, rng)
        } else {
            let bounce = self.bounce(&rec, diffuse_dir, depth, rng);
            match self.shading.direct_light {
                Some(blend) => blend.blend(bounce, self.direct_light(&rec)),
                None => bounce,
            }
        }
    }

    /// Recurse along `dir` and weight the result by albedo and cosine.
    fn bounce(&self, rec: &HitRecord<'_>, dir: Vec3, depth: u32, rng: &mut dyn RngCore) -> Color {
        let incoming = self.trace(rec.p, dir, depth - 1, rng);
        let cosine = self.shading.cosine.apply(rec.normal.dot(dir));
        incoming * rec.material.albedo * cosine
    }

    /// Unoccluded point-light contribution at a hit.
    fn direct_light(&self, rec: &HitRecord<'_>) -> Color {
        let light = self.scene.light();
        let to_light = try_normalize_or(light.position - rec.p, rec.normal);
        light.intensity * self.shading.cosine.apply(rec.normal.dot(to_light))
    }
}
