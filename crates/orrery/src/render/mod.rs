//! # Render: The Backend Contract
//!
//! The scene graph never talks to a graphics API directly. Components that
//! draw (the [`Primitive`](crate::component::Primitive)) go through the
//! [`RenderBackend`] trait:
//!
//! ```text
//!   setup time                         every frame
//!   ──────────                         ───────────
//!   create_buffer(data)  → handle      begin_frame(&RenderState)
//!   create_texture(rgba) → handle      draw(&DrawCall)  × N
//!   update_texture(handle, rgba)       (backend presents when it likes)
//! ```
//!
//! Handles are indices into backend-owned storage. They are created once at
//! assembly time and stay valid for the life of the backend; textures can
//! have their *contents* replaced behind a stable handle, which is how
//! asynchronously decoded images show up (see [`asset`](crate::asset)).
//!
//! ## Implementations
//!
//! - [`CommandRecorder`](recorder::CommandRecorder): headless; records every
//!   call. Used by tests and the `headless` demo.
//! - [`WgpuBackend`](backend::WgpuBackend): draws through wgpu into a winit
//!   window (feature `window`).

pub mod recorder;
pub mod state;

#[cfg(feature = "window")]
pub mod backend;
#[cfg(feature = "window")]
pub mod gpu;
#[cfg(feature = "window")]
pub(crate) mod pipeline;
#[cfg(feature = "window")]
pub(crate) mod vertex;

pub use recorder::CommandRecorder;
pub use state::RenderState;

#[cfg(feature = "window")]
pub use backend::WgpuBackend;
#[cfg(feature = "window")]
pub use gpu::GpuContext;

use crate::material::Material;
use crate::math::Mat4;

/// Handle to a GPU buffer owned by a [`RenderBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub(crate) usize);

/// Handle to a 2D texture owned by a [`RenderBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub(crate) usize);

/// Data for a new buffer.
#[derive(Debug, Clone, Copy)]
pub enum BufferData<'a> {
    /// Per-vertex attribute floats (positions, normals or UVs).
    Attribute(&'a [f32]),
    /// Triangle / line indices.
    Index(&'a [u32]),
}

impl BufferData<'_> {
    /// Number of elements (floats or indices) in the buffer.
    pub fn len(&self) -> usize {
        match self {
            BufferData::Attribute(data) => data.len(),
            BufferData::Index(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// How indices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DrawMode {
    #[default]
    Triangles,
    Lines,
    LineStrip,
}

/// The four buffers that make up one piece of geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryBuffers {
    pub positions: BufferHandle,
    pub normals: BufferHandle,
    pub tex_coords: BufferHandle,
    pub indices: BufferHandle,
}

/// Everything a backend needs to issue one indexed draw.
#[derive(Debug, Clone, Copy)]
pub struct DrawCall<'a> {
    pub geometry: GeometryBuffers,
    pub index_count: u32,
    pub mode: DrawMode,
    /// World transform of the drawing entity.
    pub model: Mat4,
    pub material: &'a Material,
}

/// The renderer capability consumed by the scene graph.
pub trait RenderBackend {
    /// Upload `data` into a new, immutable buffer.
    fn create_buffer(&mut self, data: BufferData<'_>) -> BufferHandle;

    /// Create a texture from tightly packed RGBA8 pixels.
    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> TextureHandle;

    /// Replace the contents of an existing texture. The handle stays valid.
    fn update_texture(&mut self, texture: TextureHandle, width: u32, height: u32, rgba: &[u8]);

    /// Start a frame: clear, upload camera and light state.
    fn begin_frame(&mut self, state: &RenderState);

    /// Issue one indexed draw.
    fn draw(&mut self, call: &DrawCall<'_>);
}

/// A single white texel, bound whenever a material has no albedo texture.
pub const WHITE_TEXEL: [u8; 4] = [255, 255, 255, 255];
