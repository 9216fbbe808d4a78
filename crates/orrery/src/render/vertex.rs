//! # Vertex: Attribute Layouts and Uniform Blocks
//!
//! Geometry arrives as three separate flat float arrays (see
//! [`MeshData`](crate::mesh::MeshData)), so each attribute gets its own
//! vertex buffer slot instead of one interleaved struct:
//!
//! ```text
//! slot 0  position  [f32; 3]  stride 12  location(0)
//! slot 1  normal    [f32; 3]  stride 12  location(1)
//! slot 2  uv        [f32; 2]  stride  8  location(2)
//! ```
//!
//! ## Uniform Blocks
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │ Group 0:  Frame (per frame)                                   │
//! │   view_proj, camera_pos, light position + ambient/diffuse/    │
//! │   specular                                        144 bytes   │
//! ├───────────────────────────────────────────────────────────────┤
//! │ Group 1:  Albedo texture + sampler (per texture)              │
//! ├───────────────────────────────────────────────────────────────┤
//! │ Group 2:  Object (per draw, dynamic offset)                   │
//! │   model, normal_matrix, Phong material            192 bytes   │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every `vec3` is followed by a scalar (either real data or padding) so
//! the Rust layout matches WGSL's 16-byte `vec3` alignment.

use bytemuck::{Pod, Zeroable};

use super::RenderState;
use crate::material::Material;
use crate::math::Mat4;

pub(crate) const POSITION_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: 12,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &[wgpu::VertexAttribute {
        offset: 0,
        shader_location: 0,
        format: wgpu::VertexFormat::Float32x3,
    }],
};

pub(crate) const NORMAL_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: 12,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &[wgpu::VertexAttribute {
        offset: 0,
        shader_location: 1,
        format: wgpu::VertexFormat::Float32x3,
    }],
};

pub(crate) const UV_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: 8,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &[wgpu::VertexAttribute {
        offset: 0,
        shader_location: 2,
        format: wgpu::VertexFormat::Float32x2,
    }],
};

/// Camera and light, shared by every draw in a frame.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub(crate) struct FrameUniform {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 3],
    pub _pad0: f32,
    pub light_pos: [f32; 3],
    pub _pad1: f32,
    pub light_ambient: [f32; 3],
    pub _pad2: f32,
    pub light_diffuse: [f32; 3],
    pub _pad3: f32,
    pub light_specular: [f32; 3],
    pub _pad4: f32,
}

impl FrameUniform {
    pub fn from_state(state: &RenderState) -> Self {
        Self {
            view_proj: state.view_projection().to_cols_array_2d(),
            camera_pos: state.camera_position.to_array(),
            light_pos: state.light_position.to_array(),
            light_ambient: state.light.ambient.to_array(),
            light_diffuse: state.light.diffuse.to_array(),
            light_specular: state.light.specular.to_array(),
            ..Self::zeroed()
        }
    }
}

/// Per-draw transform and material.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub(crate) struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of the model matrix; the shader uses the upper 3x3.
    pub normal_matrix: [[f32; 4]; 4],
    pub ambient: [f32; 3],
    pub shininess: f32,
    pub diffuse: [f32; 3],
    pub _pad0: f32,
    pub specular: [f32; 3],
    pub _pad1: f32,
    pub emission: [f32; 3],
    pub _pad2: f32,
}

impl ObjectUniform {
    pub fn new(model: Mat4, material: &Material) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: model.inverse().transpose().to_cols_array_2d(),
            ambient: material.ambient.to_array(),
            shininess: material.shininess(),
            diffuse: material.diffuse.to_array(),
            specular: material.specular.to_array(),
            emission: material.emission.to_array(),
            ..Self::zeroed()
        }
    }
}

/// Skybox: maps clip space back to world directions.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub(crate) struct SkyUniform {
    pub inv_view_proj: [[f32; 4]; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sizes_match_wgsl() {
        assert_eq!(std::mem::size_of::<FrameUniform>(), 144);
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 192);
        assert_eq!(std::mem::size_of::<SkyUniform>(), 64);
    }

    #[test]
    fn object_uniform_carries_material() {
        let mut material = Material::default();
        material.set_shininess(48.0);
        let uniform = ObjectUniform::new(Mat4::IDENTITY, &material);
        assert_eq!(uniform.shininess, 48.0);
        assert_eq!(uniform.emission, [0.0; 3]);
        assert_eq!(uniform.normal_matrix, Mat4::IDENTITY.to_cols_array_2d());
    }
}
