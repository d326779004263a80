//! The renderable scene: primitives, one light and the background.

use crate::hittable::{HitRecord, Hittable};
use crate::plane::Plane;
use crate::sphere::Sphere;
use crate::Color;
use lightbox_core::{PointLight, SceneDescription};
use lightbox_math::{Interval, Ray};

/// An immutable scene, built once and shared read-only by every worker.
#[derive(Clone, Debug)]
pub struct Scene {
    spheres: Vec<Sphere>,
    ground: Plane,
    light: PointLight,
    background: Color,
}

impl Scene {
    /// Create a scene with only a ground plane.
    pub fn new(ground: Plane, light: PointLight, background: Color) -> Self {
        Self {
            spheres: Vec::new(),
            ground,
            light,
            background,
        }
    }

    /// Build from a validated description.
    pub fn from_description(desc: &SceneDescription) -> Self {
        let mut scene = Scene::new(Plane::from(&desc.ground), desc.light, desc.background);
        scene.spheres = desc.spheres.iter().map(Sphere::from).collect();

        log::info!("Scene built with {} spheres and a ground plane", scene.spheres.len());
        scene
    }

    /// Add a sphere.
    pub fn with_sphere(mut self, sphere: Sphere) -> Self {
        self.spheres.push(sphere);
        self
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn ground(&self) -> &Plane {
        &self.ground
    }

    pub fn light(&self) -> &PointLight {
        &self.light
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Closest intersection along the ray at a positive distance.
    ///
    /// The ground is tested first, then spheres in order; a later surface
    /// only wins at a strictly smaller distance.
    pub fn closest_hit(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;
        let mut ray_t = Interval::POSITIVE;

        let surfaces = std::iter::once(&self.ground as &dyn Hittable)
            .chain(self.spheres.iter().map(|s| s as &dyn Hittable));

        for surface in surfaces {
            if let Some(rec) = surface.hit(ray, ray_t) {
                ray_t = ray_t.with_max(rec.t);
                closest = Some(rec);
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightbox_core::Material;
    use lightbox_math::Vec3;

    fn test_scene() -> Scene {
        Scene::new(
            Plane::new(
                Vec3::new(0.0, -1.0, 0.0),
                Vec3::Y,
                Material::diffuse(Vec3::new(0.0, 1.0, 0.0)),
            ),
            PointLight {
                position: Vec3::new(0.0, 10.0, 0.0),
                intensity: Vec3::ONE,
            },
            Color::new(0.5, 0.7, 1.0),
        )
        .with_sphere(Sphere::new(
            Vec3::new(0.0, 0.0, -5.0),
            1.0,
            Material::diffuse(Vec3::new(1.0, 0.0, 0.0)),
        ))
        .with_sphere(Sphere::new(
            Vec3::new(0.0, 0.0, -3.0),
            0.5,
            Material::diffuse(Vec3::new(0.0, 0.0, 1.0)),
        ))
    }

    #[test]
    fn test_closest_sphere_wins() {
        let scene = test_scene();
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);

        let rec = scene.closest_hit(&ray).unwrap();
        assert!((rec.t - 2.5).abs() < 1e-5);
        assert_eq!(rec.material.albedo, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_ground_hit() {
        let scene = test_scene();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, -1.0, -0.1));

        let rec = scene.closest_hit(&ray).unwrap();
        assert_eq!(rec.normal, Vec3::Y);
        assert_eq!(rec.material.albedo, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_sphere_in_front_of_ground() {
        // Ray that would reach the ground, but a sphere sits in the way
        let scene = test_scene();
        let ray = Ray::new(Vec3::new(0.0, 3.0, -3.0), -Vec3::Y);

        let rec = scene.closest_hit(&ray).unwrap();
        assert_eq!(rec.material.albedo, Vec3::new(0.0, 0.0, 1.0));
        assert!((rec.t - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_miss() {
        let scene = test_scene();
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(scene.closest_hit(&ray).is_none());
    }

    #[test]
    fn test_from_description() {
        let desc = lightbox_core::presets::lightbox();
        let scene = Scene::from_description(&desc);
        assert_eq!(scene.spheres().len(), 4);
        assert_eq!(scene.background(), desc.background);
        assert_eq!(scene.ground().normal(), Vec3::Y);
        assert_eq!(scene.light().intensity, Vec3::new(1.3, 1.3, 0.0));
    }
}
