//! Sphere primitive for ray tracing.

use crate::hittable::Hittable;
use lightbox_core::{Material, SphereDesc};
use lightbox_math::{try_normalize_or, Ray, Vec3, NORMALIZE_EPSILON};

/// A sphere primitive.
#[derive(Clone, Debug)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }
}

impl From<&SphereDesc> for Sphere {
    fn from(desc: &SphereDesc) -> Self {
        Sphere::new(desc.center, desc.radius, desc.material)
    }
}

impl Hittable for Sphere {
    /// Geometric solution: project the centre onto the ray, then step back
    /// and forth by the half-chord.
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        let len = ray.direction().length();
        if !(len > NORMALIZE_EPSILON) {
            return None;
        }
        let dir = ray.direction() / len;

        let l = self.center - ray.origin();
        let tca = l.dot(dir);
        let l2 = l.length_squared();
        let r2 = self.radius * self.radius;

        // Outside and facing away
        if l2 > r2 && tca < 0.0 {
            return None;
        }

        let d2 = (l2 - tca * tca).max(0.0);
        if d2 > r2 {
            return None;
        }

        let tch = (r2 - d2).sqrt();
        let t0 = tca - tch;
        let t1 = tca + tch;

        // Inside the sphere the near root is behind us; take the exit point
        let t = if t0 > 0.0 { t0 } else { t1 };
        if t > 0.0 {
            // Back to the caller's direction scale
            Some(t / len)
        } else {
            None
        }
    }

    fn outward_normal(&self, p: Vec3) -> Vec3 {
        try_normalize_or(p - self.center, Vec3::Y)
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
