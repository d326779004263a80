//! Built-in scenes.
//!
//! `lightbox` is the reference scene: four spheres over a green ground
//! plane, a yellow point light up and to the left, and a pale sky
//! background. The other presets share its geometry and differ only in
//! how the direct light is blended.

use lightbox_math::Vec3;

use crate::material::Material;
use crate::scene::{
    CameraDesc, DirectLight, PlaneDesc, PointLight, RenderSettings, SceneDescription, SphereDesc,
};

/// Names accepted by [`preset`].
pub const PRESET_NAMES: &[&str] = &["lightbox", "lightbox_soft", "lightbox_bounce"];

/// Pale sky blue used by every preset.
pub const SKY: Vec3 = Vec3::new(0.705, 0.913, 0.980);

/// Look up a preset by name.
pub fn preset(name: &str) -> Option<SceneDescription> {
    match name {
        "lightbox" => Some(lightbox()),
        "lightbox_soft" => Some(lightbox_soft()),
        "lightbox_bounce" => Some(lightbox_bounce()),
        _ => None,
    }
}

/// The reference scene with a 0.8 / 0.2 bounce/light blend.
pub fn lightbox() -> SceneDescription {
    SceneDescription {
        camera: CameraDesc {
            position: Vec3::new(0.0, 0.0, 1.0),
        },
        spheres: vec![
            // Warm diffuse sphere, front left
            SphereDesc::new(
                Vec3::new(-0.65, -0.2, -1.5),
                0.27,
                Material::diffuse(Vec3::new(0.7, 0.5, 0.4)),
            ),
            // Green, slightly glossy, centre
            SphereDesc::new(
                Vec3::new(0.0, 0.0, -2.7),
                0.3,
                Material::new(Vec3::new(0.2, 0.7, 0.4), 0.08),
            ),
            // Mirror, far right
            SphereDesc::new(
                Vec3::new(1.5, 0.7, -6.1),
                0.5,
                Material::new(Vec3::new(0.9, 0.9, 0.9), 1.0),
            ),
            // Small blue sphere close to the camera
            SphereDesc::new(
                Vec3::new(0.3, -0.2, -0.9),
                0.1,
                Material::new(Vec3::new(0.1, 0.1, 0.8), 0.1),
            ),
        ],
        ground: PlaneDesc::new(
            Vec3::new(0.0, -0.3, 0.0),
            Vec3::Y,
            Material::diffuse(Vec3::new(0.128, 0.813, 0.291)),
        ),
        light: PointLight {
            position: Vec3::new(-3.0, 10.0, 5.0),
            intensity: Vec3::new(1.3, 1.3, 0.0),
        },
        background: SKY,
        settings: RenderSettings::default(),
    }
}

/// The reference geometry with a faint 0.95 / 0.05 light contribution.
pub fn lightbox_soft() -> SceneDescription {
    let mut scene = lightbox();
    scene.settings.direct_light = Some(DirectLight::new(0.95, 0.05));
    scene
}

/// The reference geometry lit only by bounced background light.
pub fn lightbox_bounce() -> SceneDescription {
    let mut scene = lightbox();
    scene.settings.direct_light = None;
    scene
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for name in PRESET_NAMES {
            let scene = preset(name).unwrap();
            assert!(scene.validate().is_ok(), "preset {name} failed validation");
        }
    }

    #[test]
    fn test_reference_scene_layout() {
        let scene = lightbox();
        assert_eq!(scene.spheres.len(), 4);
        assert_eq!(scene.settings.width, 1024);
        assert_eq!(scene.settings.height, 512);
        assert_eq!(scene.settings.samples_per_pixel, 160);
        assert_eq!(scene.settings.max_depth, 20);
        assert_eq!(scene.settings.direct_light, Some(DirectLight::new(0.8, 0.2)));

        // Only the far sphere is a perfect mirror
        let mirrors: Vec<_> = scene
            .spheres
            .iter()
            .filter(|s| s.material.reflectiveness == 1.0)
            .collect();
        assert_eq!(mirrors.len(), 1);
    }

    #[test]
    fn test_variants_differ_only_in_blend() {
        let base = lightbox();
        let soft = lightbox_soft();
        let bounce = lightbox_bounce();

        assert_eq!(soft.spheres, base.spheres);
        assert_eq!(bounce.ground, base.ground);
        assert_eq!(soft.settings.direct_light, Some(DirectLight::new(0.95, 0.05)));
        assert_eq!(bounce.settings.direct_light, None);
    }

    #[test]
    fn test_unknown_preset() {
        assert!(preset("teapot").is_none());
    }
}
