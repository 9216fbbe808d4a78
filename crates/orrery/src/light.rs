//! Point light colours.
//!
//! The light's position is the world translation of the entity carrying the
//! [`PointLight`]; only its Phong terms live here.

use crate::math::Vec3;

/// Phong light terms, each an RGB intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl PointLight {
    /// A white light with the same intensity on every channel.
    pub fn uniform(ambient: f32, diffuse: f32, specular: f32) -> Self {
        Self {
            ambient: Vec3::splat(ambient),
            diffuse: Vec3::splat(diffuse),
            specular: Vec3::splat(specular),
        }
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self::uniform(0.1, 0.9, 0.5)
    }
}
