//! Hittable trait and HitRecord for ray-object intersection.

use lightbox_core::Material;
use lightbox_math::{Interval, Ray, Vec3};

/// Distance a hit point is pushed off its surface before it is used as the
/// origin of a new ray.
pub const SELF_INTERSECTION_EPSILON: f32 = 1e-4;

/// Record of a ray-object intersection. Lives for one trace step.
#[derive(Clone, Copy, Debug)]
pub struct HitRecord<'a> {
    /// Hit point, offset off the surface toward the incoming ray's side
    pub p: Vec3,
    /// Unit surface normal, oriented away from the surface interior
    pub normal: Vec3,
    /// Ray parameter of the exact intersection
    pub t: f32,
    /// Material at the intersection point
    pub material: &'a Material,
}

impl<'a> HitRecord<'a> {
    /// Build a record for an intersection at parameter `t`.
    ///
    /// The stored point is backed off the surface along the normal, on the
    /// side the ray arrived from, so rays spawned from it do not
    /// immediately re-hit the same surface.
    pub fn new(ray: &Ray, t: f32, normal: Vec3, material: &'a Material) -> Self {
        let side = if ray.direction().dot(normal) <= 0.0 { 1.0 } else { -1.0 };
        let p = ray.at(t) + normal * (side * SELF_INTERSECTION_EPSILON);
        Self {
            p,
            normal,
            t,
            material,
        }
    }
}

/// Trait for analytic surfaces that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Nearest strictly positive ray parameter at which the ray meets the
    /// surface, or `None`.
    fn intersect(&self, ray: &Ray) -> Option<f32>;

    /// Unit normal at a point on the surface, pointing away from the interior.
    fn outward_normal(&self, p: Vec3) -> Vec3;

    /// Material of the surface.
    fn material(&self) -> &Material;

    /// Test if a ray hits this object within the given interval.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let t = self.intersect(ray)?;
        if !ray_t.surrounds(t) {
            return None;
        }
        let normal = self.outward_normal(ray.at(t));
        Some(HitRecord::new(ray, t, normal, self.material()))
    }
}
