//! Per-frame shared render data.
//!
//! [`RenderState`] is captured from the [`World`] once per frame, after
//! update and before render. It carries what every draw shares: camera
//! matrices, the light, and the clear colour. Backends upload it in
//! [`begin_frame`](super::RenderBackend::begin_frame).

use crate::camera::{Lens, view_matrix};
use crate::light::PointLight;
use crate::math::{Color, Mat4, Vec3};
use crate::world::World;

/// Camera, light and clear colour for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    pub view: Mat4,
    pub projection: Mat4,
    /// World-space camera position, for specular highlights.
    pub camera_position: Vec3,
    /// World-space light position.
    pub light_position: Vec3,
    pub light: PointLight,
    pub clear_color: Color,
}

impl RenderState {
    /// Read the camera and light out of `world`.
    ///
    /// The camera's lens takes `aspect` from the surface. A world with no
    /// camera renders from the origin looking down -Z; a world with no light
    /// gets an unlit default light at the origin.
    pub fn capture(world: &World, aspect: f32, clear_color: Color) -> Self {
        let mut state = Self {
            clear_color,
            ..Self::default()
        };

        match world.camera() {
            Some(id) => {
                let transform = world.transformation(id).unwrap_or(Mat4::IDENTITY);
                let lens = world.get(id).and_then(|e| e.lens()).copied().unwrap_or_default();
                state.projection = Lens { aspect, ..lens }.projection();
                state.view = view_matrix(transform);
                state.camera_position = transform.w_axis.truncate();
            }
            None => {
                log::debug!("No camera in world; rendering from the origin");
                state.projection = Lens { aspect, ..Lens::default() }.projection();
            }
        }

        if let Some(id) = world.light() {
            state.light_position = world.world_translation(id).unwrap_or(Vec3::ZERO);
            if let Some(light) = world.get(id).and_then(|e| e.light()) {
                state.light = *light;
            }
        }

        state
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Inverse of `projection × view` with the view's translation removed.
    ///
    /// Maps a clip-space point on the far plane back to a world-space
    /// direction, which is what the skybox samples its cube map with.
    pub fn sky_matrix(&self) -> Mat4 {
        let mut view = self.view;
        view.w_axis = Vec3::ZERO.extend(1.0);
        (self.projection * view).inverse()
    }
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY,
            projection: Lens::default().projection(),
            camera_position: Vec3::ZERO,
            light_position: Vec3::ZERO,
            light: PointLight::default(),
            clear_color: Color::BLACK,
        }
    }
}
