//! Per-surface shading parameters.

use lightbox_math::{Interval, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};

/// Surface response consumed by the tracer.
///
/// `reflectiveness` is the probability that a bounce takes the specular
/// branch instead of the diffuse one. `fuzziness` scales the random offset
/// added to a mirror direction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Reflectance color, multiplied into every bounce
    pub albedo: Vec3,

    /// Probability in [0, 1] of a specular bounce
    #[serde(default)]
    pub reflectiveness: f32,

    /// Perturbation magnitude for specular bounces (0 = perfect mirror)
    #[serde(default)]
    pub fuzziness: f32,

    /// Index of refraction. Stored with the material but not used for
    /// shading; there is no transmission in the integrator.
    #[serde(default = "default_refractive_index")]
    pub refractive_index: f32,
}

fn default_refractive_index() -> f32 {
    1.0
}

impl Default for Material {
    fn default() -> Self {
        Self {
            albedo: Vec3::splat(0.5), // Grey default
            reflectiveness: 0.0,
            fuzziness: 0.0,
            refractive_index: default_refractive_index(),
        }
    }
}

impl Material {
    /// Create a material with the given albedo and specular probability.
    pub fn new(albedo: Vec3, reflectiveness: f32) -> Self {
        Self {
            albedo,
            reflectiveness,
            ..Default::default()
        }
    }

    /// A purely diffuse material.
    pub fn diffuse(albedo: Vec3) -> Self {
        Self::new(albedo, 0.0)
    }

    /// Set the specular fuzz.
    pub fn with_fuzziness(mut self, fuzziness: f32) -> Self {
        self.fuzziness = fuzziness;
        self
    }

    /// Set the refractive index.
    pub fn with_refractive_index(mut self, refractive_index: f32) -> Self {
        self.refractive_index = refractive_index;
        self
    }

    /// Check the material invariants. `surface` names the owner in errors.
    pub fn validate(&self, surface: &str) -> SceneResult<()> {
        if !self.albedo.is_finite()
            || !self.reflectiveness.is_finite()
            || !self.fuzziness.is_finite()
            || !self.refractive_index.is_finite()
        {
            return Err(SceneError::NonFinite(format!("{surface} material")));
        }
        if !Interval::UNIT.contains(self.reflectiveness) {
            return Err(SceneError::InvalidReflectiveness {
                surface: surface.to_string(),
                value: self.reflectiveness,
            });
        }
        if self.fuzziness < 0.0 {
            return Err(SceneError::NegativeFuzziness {
                surface: surface.to_string(),
                value: self.fuzziness,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_builders() {
        let m = Material::new(Vec3::new(0.2, 0.7, 0.4), 0.08)
            .with_fuzziness(0.1)
            .with_refractive_index(1.5);
        assert_eq!(m.albedo, Vec3::new(0.2, 0.7, 0.4));
        assert_eq!(m.reflectiveness, 0.08);
        assert_eq!(m.fuzziness, 0.1);
        assert_eq!(m.refractive_index, 1.5);

        let d = Material::diffuse(Vec3::ONE);
        assert_eq!(d.reflectiveness, 0.0);
        assert_eq!(d.refractive_index, 1.0);
    }

    #[test]
    fn test_material_validate() {
        assert!(Material::default().validate("sphere 0").is_ok());
        assert!(Material::new(Vec3::ONE, 1.0).validate("sphere 0").is_ok());

        let err = Material::new(Vec3::ONE, 1.2).validate("sphere 3").unwrap_err();
        assert_eq!(
            err,
            SceneError::InvalidReflectiveness {
                surface: "sphere 3".into(),
                value: 1.2
            }
        );

        let err = Material::default().with_fuzziness(-0.5).validate("ground").unwrap_err();
        assert!(matches!(err, SceneError::NegativeFuzziness { .. }));

        let err = Material::diffuse(Vec3::new(f32::NAN, 0.0, 0.0))
            .validate("ground")
            .unwrap_err();
        assert!(matches!(err, SceneError::NonFinite(_)));
    }

    #[test]
    fn test_material_serde_defaults() {
        let m: Material = serde_json::from_str(r#"{ "albedo": [0.1, 0.2, 0.3] }"#).unwrap();
        assert_eq!(m.albedo, Vec3::new(0.1, 0.2, 0.3));
        assert_eq!(m.reflectiveness, 0.0);
        assert_eq!(m.fuzziness, 0.0);
        assert_eq!(m.refractive_index, 1.0);
    }
}
