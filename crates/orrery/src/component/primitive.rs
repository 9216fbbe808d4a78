//! Drawable geometry.

use crate::entity::Entity;
use crate::input::{Input, actions};
use crate::material::Material;
use crate::math::Mat4;
use crate::mesh::MeshData;
use crate::render::{BufferData, DrawCall, DrawMode, GeometryBuffers, RenderBackend, RenderState};

/// Uploaded geometry plus the material it is drawn with.
///
/// The buffers are created once, in [`Primitive::create`], and never
/// touched again. Wireframe mode swaps the draw mode for a line strip over
/// the same indices; it does not rebuild anything.
#[derive(Debug, Clone)]
pub struct Primitive {
    geometry: GeometryBuffers,
    index_count: u32,
    mode: DrawMode,
    wireframe: bool,
    pub material: Material,
}

impl Primitive {
    /// Upload `mesh` through `backend`.
    ///
    /// Missing normals or texture coordinates are uploaded as zeros so every
    /// attribute buffer covers every vertex.
    pub fn create(backend: &mut dyn RenderBackend, mesh: &MeshData, material: Material) -> Self {
        let count = mesh.vertex_count();
        let zero_normals;
        let normals = if mesh.normals.is_empty() {
            zero_normals = vec![0.0; count * 3];
            &zero_normals
        } else {
            &mesh.normals
        };
        let zero_uvs;
        let tex_coords = if mesh.tex_coords.is_empty() {
            zero_uvs = vec![0.0; count * 2];
            &zero_uvs
        } else {
            &mesh.tex_coords
        };

        let geometry = GeometryBuffers {
            positions: backend.create_buffer(BufferData::Attribute(&mesh.vertices)),
            normals: backend.create_buffer(BufferData::Attribute(normals)),
            tex_coords: backend.create_buffer(BufferData::Attribute(tex_coords)),
            indices: backend.create_buffer(BufferData::Index(&mesh.indices)),
        };

        Self {
            geometry,
            index_count: mesh.indices.len() as u32,
            mode: DrawMode::Triangles,
            wireframe: false,
            material,
        }
    }

    /// Fill mode used when wireframe is off.
    pub fn with_mode(mut self, mode: DrawMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn geometry(&self) -> GeometryBuffers {
        self.geometry
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn is_wireframe(&self) -> bool {
        self.wireframe
    }

    /// The mode the next draw will use.
    pub fn draw_mode(&self) -> DrawMode {
        if self.wireframe { DrawMode::LineStrip } else { self.mode }
    }

    pub(crate) fn update(&mut self, input: &Input) {
        if input.is_action_down(actions::TOGGLE_WIREFRAME) {
            self.wireframe = !input.is_action_down(actions::SHIFT);
        }
        if input.is_action_down(actions::RESET) {
            self.wireframe = false;
        }
    }

    pub(crate) fn render(&self, backend: &mut dyn RenderBackend, _state: &RenderState, _owner: &Entity, world: Mat4) {
        backend.draw(&DrawCall {
            geometry: self.geometry,
            index_count: self.index_count,
            mode: self.draw_mode(),
            model: world,
            material: &self.material,
        });
    }
}
