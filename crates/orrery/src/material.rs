//! Surface lighting coefficients.
//!
//! A [`Material`] is a plain value owned by the
//! [`Primitive`](crate::component::Primitive) that draws with it. It is
//! never shared between primitives, and the only invariant it keeps is the
//! shininess range.

use crate::math::{Color, Vec3};
use crate::render::TextureHandle;

/// Phong material: ambient / diffuse / specular / emission colors, a
/// specular exponent, and an optional albedo texture.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub emission: Vec3,
    shininess: f32,
    /// `None` samples the backend's 1x1 white texture.
    pub albedo: Option<TextureHandle>,
}

impl Material {
    pub const MIN_SHININESS: f32 = 0.00001;
    pub const MAX_SHININESS: f32 = 128.0;

    pub fn new(ambient: Vec3, diffuse: Vec3, specular: Vec3, emission: Vec3, shininess: f32) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            emission,
            shininess: clamp_shininess(shininess),
            albedo: None,
        }
    }

    /// Default material with the given diffuse color.
    pub fn from_diffuse(diffuse: Color) -> Self {
        Self {
            diffuse: diffuse.rgb_vec3(),
            ..Self::default()
        }
    }

    pub fn shininess(&self) -> f32 {
        self.shininess
    }

    /// Set the specular exponent, clamped to
    /// `[MIN_SHININESS, MAX_SHININESS]`.
    pub fn set_shininess(&mut self, shininess: f32) {
        self.shininess = clamp_shininess(shininess);
    }

    pub fn set_emission(&mut self, color: Color) {
        self.emission = color.rgb_vec3();
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(Vec3::ONE, Vec3::ONE, Vec3::ONE, Vec3::ZERO, 16.0)
    }
}

fn clamp_shininess(value: f32) -> f32 {
    value.clamp(Material::MIN_SHININESS, Material::MAX_SHININESS)
}
