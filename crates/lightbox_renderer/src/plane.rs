//! Infinite plane primitive.

use crate::hittable::Hittable;
use lightbox_core::{Material, PlaneDesc};
use lightbox_math::{Ray, Vec3};

/// Below this |n . d| (per unit of direction length) the ray is treated as
/// parallel to the plane.
pub const PARALLEL_EPSILON: f32 = 1e-6;

/// A two-sided infinite plane.
#[derive(Clone, Debug)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
    material: Material,
}

impl Plane {
    /// Create a new plane. `normal` must be unit length.
    pub fn new(point: Vec3, normal: Vec3, material: Material) -> Self {
        debug_assert!((normal.length() - 1.0).abs() < 1e-3, "plane normal must be unit length");
        Self {
            point,
            normal,
            material,
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl From<&PlaneDesc> for Plane {
    fn from(desc: &PlaneDesc) -> Self {
        Plane::new(desc.point, desc.normal, desc.material)
    }
}

impl Hittable for Plane {
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        let denom = self.normal.dot(ray.direction());
        // Either face may be hit, so only near-zero denominators are rejected
        if denom.abs() <= PARALLEL_EPSILON * ray.direction().length() {
            return None;
        }

        let t = (self.point - ray.origin()).dot(self.normal) / denom;
        if t > 0.0 && t.is_finite() {
            Some(t)
        } else {
            None
        }
    }

    fn outward_normal(&self, _p: Vec3) -> Vec3 {
        self.normal
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
