//! Perspective camera data.
//!
//! A [`Lens`] is attached to an [`Entity`](crate::entity::Entity); the
//! entity's world transform places the camera, the lens shapes the frustum.
//! The view matrix is the inverse of the camera's world transform, so a
//! camera parented to a rotating pivot orbits with it.

use crate::math::Mat4;

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lens {
    /// Vertical field of view in degrees. Default: 45.
    pub fov_y: f32,
    /// Width / height. Updated from the surface size every frame.
    pub aspect: f32,
    /// Near clipping plane distance. Default: 0.1.
    pub near: f32,
    /// Far clipping plane distance. Default: 100.
    pub far: f32,
}

impl Lens {
    /// Right-handed perspective projection with a `[0, 1]` depth range.
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y.to_radians(), self.aspect, self.near, self.far)
    }

    /// `projection × view` for a camera whose world transform is `world`.
    pub fn view_projection(&self, world: Mat4) -> Mat4 {
        self.projection() * view_matrix(world)
    }
}

impl Default for Lens {
    fn default() -> Self {
        Self {
            fov_y: 45.0,
            aspect: 1.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// The view matrix of a camera: the inverse of its world transform.
pub fn view_matrix(world: Mat4) -> Mat4 {
    world.inverse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    #[test]
    fn view_undoes_camera_translation() {
        let world = Mat4::from_translation(Vec3::new(0.0, 0.0, 6.0));
        let view = view_matrix(world);
        let p = view.transform_point3(Vec3::new(0.0, 0.0, 6.0));
        assert!(p.abs_diff_eq(Vec3::ZERO, 1e-6));
    }

    #[test]
    fn points_in_front_of_camera_land_in_depth_range() {
        let lens = Lens { aspect: 16.0 / 9.0, ..Lens::default() };
        let world = Mat4::from_translation(Vec3::new(0.0, 0.0, 6.0));
        let clip = lens.view_projection(world) * Vec3::ZERO.extend(1.0);
        let ndc_z = clip.z / clip.w;
        assert!((0.0..=1.0).contains(&ndc_z), "ndc z was {ndc_z}");
    }
}
