//! # Spatial: Parent-Relative Transforms
//!
//! Every object that exists in the scene carries a [`Spatial`]: a rotation,
//! a translation and a per-axis scale, all expressed relative to an optional
//! parent. The parent is a non-owning [`EntityId`] into the
//! [`World`](crate::world::World)'s flat entity list; the world owns every
//! entity, a `Spatial` only points at one.
//!
//! ## Local Matrix (TRS)
//!
//! ```text
//! local = T × R × S
//!
//!   point ──scale──► ──rotate──► ──translate──► parent space
//! ```
//!
//! Scale is applied first, then rotation, then translation. The world matrix
//! is `parent_world × local`, evaluated by
//! [`World::transformation`](crate::world::World::transformation) by walking
//! the parent chain on every query. Nothing is cached, so there is no dirty
//! flag to get wrong; the price is O(depth) per query, and scene graphs here
//! are at most a handful of levels deep.
//!
//! ## Rotation Convention
//!
//! `rotate_x/y/z` post-multiply the current rotation by a half-angle encoded
//! axis quaternion (`q ← q ⊗ axis(θ)`), so rotations are applied about the
//! object's *local* axes. The result is re-normalized after every call:
//! repeated composition drifts away from unit length in `f32` otherwise.
//!
//! ## Comparison
//!
//! - **Bevy**: `Transform` + `GlobalTransform`, with a propagation system
//!   that caches world matrices once per frame.
//! - **three.js**: `Object3D.matrixWorld` with `matrixWorldNeedsUpdate`
//!   dirty flags.

use crate::math::{Mat4, Quat, Vec3};
use crate::world::EntityId;

/// Rotation, translation and scale relative to an optional parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spatial {
    pub rotation: Quat,
    pub translation: Vec3,
    pub scale: Vec3,
    parent: Option<EntityId>,
}

impl Spatial {
    /// Identity rotation, origin, unit scale, no parent.
    pub const IDENTITY: Self = Self {
        rotation: Quat::IDENTITY,
        translation: Vec3::ZERO,
        scale: Vec3::ONE,
        parent: None,
    };

    /// Create a spatial at the given position.
    pub fn from_xyz(x: f32, y: f32, z: f32) -> Self {
        Self {
            translation: Vec3::new(x, y, z),
            ..Self::IDENTITY
        }
    }

    /// Return a copy with uniform scale applied.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// Return a copy moved to `translation`.
    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    /// The parent this spatial is expressed relative to, if any.
    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    /// Hierarchy edits go through [`World::set_parent`](crate::world::World::set_parent),
    /// which checks for cycles first.
    pub(crate) fn set_parent(&mut self, parent: Option<EntityId>) {
        self.parent = parent;
    }

    /// `translation += offset`.
    pub fn translate(&mut self, offset: Vec3) {
        self.translation += offset;
    }

    /// Rotate about the local X axis.
    pub fn rotate_x(&mut self, radians: f32) {
        self.compose(Quat::from_rotation_x(radians));
    }

    /// Rotate about the local Y axis.
    pub fn rotate_y(&mut self, radians: f32) {
        self.compose(Quat::from_rotation_y(radians));
    }

    /// Rotate about the local Z axis.
    pub fn rotate_z(&mut self, radians: f32) {
        self.compose(Quat::from_rotation_z(radians));
    }

    fn compose(&mut self, axis_rotation: Quat) {
        self.rotation = (self.rotation * axis_rotation).normalize();
    }

    /// The local `T × R × S` matrix, ignoring the parent.
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for Spatial {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn default_is_identity() {
        let s = Spatial::default();
        assert_eq!(s.rotation, Quat::IDENTITY);
        assert_eq!(s.translation, Vec3::ZERO);
        assert_eq!(s.scale, Vec3::ONE);
        assert_eq!(s.parent(), None);
        assert_eq!(s.local_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn translate_accumulates() {
        let mut s = Spatial::from_xyz(1.0, 0.0, 0.0);
        s.translate(Vec3::new(0.5, 2.0, -1.0));
        s.translate(Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(s.translation, Vec3::new(2.0, 2.0, -1.0));
    }

    #[test]
    fn local_matrix_is_scale_then_rotate_then_translate() {
        let mut s = Spatial::from_xyz(1.0, 2.0, 3.0).with_scale(2.0);
        s.rotate_z(FRAC_PI_2);

        // Hand-computed: columns are R·S applied to the basis, then T.
        let expected = Mat4::from_cols_array(&[
            0.0, 2.0, 0.0, 0.0, //
            -2.0, 0.0, 0.0, 0.0, //
            0.0, 0.0, 2.0, 0.0, //
            1.0, 2.0, 3.0, 1.0,
        ]);
        assert!(s.local_matrix().abs_diff_eq(expected, 1e-5));

        let p = s.local_matrix().transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::new(1.0, 4.0, 3.0), 1e-5));
    }

    #[test]
    fn rotate_x_uses_half_angle_encoding() {
        let mut s = Spatial::default();
        s.rotate_x(PI);
        // A half turn about X: (sin(π/2), 0, 0, cos(π/2)).
        assert_abs_diff_eq!(s.rotation.x.abs(), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(s.rotation.w, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn rotations_compose_about_local_axes() {
        let mut s = Spatial::default();
        s.rotate_y(FRAC_PI_2);
        s.rotate_x(FRAC_PI_2);
        let expected = Quat::from_rotation_y(FRAC_PI_2) * Quat::from_rotation_x(FRAC_PI_2);
        assert!(s.rotation.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn rotation_stays_unit_length() {
        let mut s = Spatial::default();
        let mut angle = 0.37_f32;
        for i in 0..10_000 {
            match i % 3 {
                0 => s.rotate_x(angle),
                1 => s.rotate_y(-angle * 1.7),
                _ => s.rotate_z(angle * 13.0),
            }
            angle = (angle * 1.618).rem_euclid(2.0 * PI) - PI;
            assert_abs_diff_eq!(s.rotation.length(), 1.0, epsilon = 1e-5);
        }
    }
}
