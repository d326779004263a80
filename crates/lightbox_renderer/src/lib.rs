//! Lightbox Renderer - CPU path tracing
//!
//! A Monte Carlo path tracer over a fixed set of analytic surfaces.
//! Every pixel averages many camera rays; every ray is traced recursively
//! with a random diffuse or specular bounce at each hit.
//!
//! Rendering is split into square buckets that run in parallel on rayon,
//! each with its own seeded random stream, so a fixed seed reproduces the
//! same image regardless of thread count.

mod bucket;
mod camera;
mod error;
mod hittable;
mod plane;
mod renderer;
mod scene;
mod sphere;
mod tracer;

pub use bucket::{bucket_rng, generate_buckets, render_bucket, Bucket, BucketResult};
pub use camera::Camera;
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, SELF_INTERSECTION_EPSILON};
pub use plane::{Plane, PARALLEL_EPSILON};
pub use renderer::{
    color_to_rgba, linear_to_gamma, render, render_pixel, render_with_cancel, ImageBuffer,
    OutputEncoding, RenderConfig,
};
pub use scene::Scene;
pub use sphere::Sphere;
pub use tracer::{Shading, Tracer};

/// Re-export Vec3 and common math types from lightbox_math
pub use lightbox_math::{Interval, Ray, Vec3};

use lightbox_math::{try_normalize_or, NORMALIZE_EPSILON};
use rand::{Rng, RngCore};

/// Radiance triple. Unbounded and unclamped until it reaches the image sink.
pub type Color = Vec3;

/// Uniform sample in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Random unit vector: each component uniform in [-1, 1), then normalized.
///
/// The distribution is not uniform over the sphere (it leans toward the
/// cube diagonals). Near-zero draws are rejected.
pub fn random_direction(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let v = Vec3::new(
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
        );
        if v.length_squared() > NORMALIZE_EPSILON {
            return try_normalize_or(v, Vec3::Y);
        }
    }
}
