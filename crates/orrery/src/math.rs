//! Math types and glam re-exports.
//!
//! We re-export [glam](https://docs.rs/glam) types so users don't need to
//! depend on it directly. Vectors, quaternions and matrices are glam's; the
//! only value type defined here is [`Color`].

use serde::{Deserialize, Serialize};

pub use glam::{Mat4, Quat, Vec3, Vec4};

/// An RGBA color with channels in `[0, 1]`.
///
/// Channels outside that range are clamped (with a warning) by every
/// constructor, so a `Color` can be uploaded to the GPU as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const RED: Self = Self { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const GREEN: Self = Self { r: 0.0, g: 1.0, b: 0.0, a: 1.0 };
    pub const BLUE: Self = Self { r: 0.0, g: 0.0, b: 1.0, a: 1.0 };

    /// Opaque color from floating-point channels.
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Color from floating-point channels, clamping each to `[0, 1]`.
    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: clamp_channel("red", r),
            g: clamp_channel("green", g),
            b: clamp_channel("blue", b),
            a: clamp_channel("alpha", a),
        }
    }

    /// Opaque color from 8-bit channels (`0..=255`).
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Linear interpolation from `a` to `b`. `t` is clamped to `[0, 1]`.
    pub fn lerp(a: Color, b: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |x: f32, y: f32| (1.0 - t) * x + t * y;
        Self {
            r: mix(a.r, b.r),
            g: mix(a.g, b.g),
            b: mix(a.b, b.b),
            a: mix(a.a, b.a),
        }
    }

    /// The RGB channels as a vector (alpha dropped).
    pub fn rgb_vec3(self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

fn clamp_channel(name: &str, value: f32) -> f32 {
    if value > 1.0 {
        log::warn!("{name} component of color exceeds 1.0; value was clamped.");
        1.0
    } else if value < 0.0 {
        log::warn!("{name} component of color is below 0.0; value was clamped.");
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn from_u8_scales_to_unit_range() {
        let c = Color::from_u8(255, 0, 51);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert_abs_diff_eq!(c.b, 0.2, epsilon = 1e-6);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn rgba_clamps_out_of_range_channels() {
        let c = Color::rgba(1.5, -0.25, 0.5, 2.0);
        assert_eq!(c, Color::rgba(1.0, 0.0, 0.5, 1.0));
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        assert_eq!(Color::lerp(Color::BLACK, Color::WHITE, 0.0), Color::BLACK);
        assert_eq!(Color::lerp(Color::BLACK, Color::WHITE, 1.0), Color::WHITE);
        let mid = Color::lerp(Color::BLACK, Color::WHITE, 0.5);
        assert_abs_diff_eq!(mid.r, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn lerp_clamps_t() {
        assert_eq!(Color::lerp(Color::RED, Color::BLUE, 7.0), Color::BLUE);
        assert_eq!(Color::lerp(Color::RED, Color::BLUE, -3.0), Color::RED);
    }
}
