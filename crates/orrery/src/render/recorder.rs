//! Headless backend that records every call.
//!
//! [`CommandRecorder`] implements [`RenderBackend`] without a GPU. It keeps
//! uploaded buffer and texture contents and a log of frames and draws, which
//! makes it the backend of choice for tests and for running the scene
//! without a window.

use super::{BufferData, BufferHandle, DrawCall, DrawMode, GeometryBuffers, RenderBackend, RenderState, TextureHandle};
use crate::material::Material;
use crate::math::Mat4;

/// Which kind of buffer was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    Attribute,
    Index,
}

/// A buffer as uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedBuffer {
    pub kind: BufferKind,
    pub len: usize,
}

/// A texture's current size and pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedTexture {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
    /// How many times the contents were replaced after creation.
    pub updates: u32,
}

/// An owned copy of a [`DrawCall`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    pub geometry: GeometryBuffers,
    pub index_count: u32,
    pub mode: DrawMode,
    pub model: Mat4,
    pub material: Material,
    /// Frame the draw belongs to (0 before the first `begin_frame`).
    pub frame: u64,
}

/// Records everything; draws nothing.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    buffers: Vec<RecordedBuffer>,
    textures: Vec<RecordedTexture>,
    draws: Vec<RecordedDraw>,
    frames: Vec<RenderState>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffers(&self) -> &[RecordedBuffer] {
        &self.buffers
    }

    /// Element count of a buffer, if the handle is ours.
    pub fn buffer_len(&self, handle: BufferHandle) -> Option<usize> {
        self.buffers.get(handle.0).map(|b| b.len)
    }

    pub fn texture(&self, handle: TextureHandle) -> Option<&RecordedTexture> {
        self.textures.get(handle.0)
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Every draw since the recorder was created.
    pub fn draws(&self) -> &[RecordedDraw] {
        &self.draws
    }

    /// Draws issued since the most recent `begin_frame`.
    pub fn last_frame_draws(&self) -> &[RecordedDraw] {
        let frame = self.frame_count();
        let start = self.draws.partition_point(|d| d.frame < frame);
        &self.draws[start..]
    }

    /// Number of `begin_frame` calls.
    pub fn frame_count(&self) -> u64 {
        self.frames.len() as u64
    }

    /// The state passed to the most recent `begin_frame`.
    pub fn last_state(&self) -> Option<&RenderState> {
        self.frames.last()
    }
}

impl RenderBackend for CommandRecorder {
    fn create_buffer(&mut self, data: BufferData<'_>) -> BufferHandle {
        let kind = match data {
            BufferData::Attribute(_) => BufferKind::Attribute,
            BufferData::Index(_) => BufferKind::Index,
        };
        self.buffers.push(RecordedBuffer { kind, len: data.len() });
        BufferHandle(self.buffers.len() - 1)
    }

    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> TextureHandle {
        self.textures.push(RecordedTexture {
            width,
            height,
            rgba: rgba.to_vec(),
            updates: 0,
        });
        TextureHandle(self.textures.len() - 1)
    }

    fn update_texture(&mut self, texture: TextureHandle, width: u32, height: u32, rgba: &[u8]) {
        match self.textures.get_mut(texture.0) {
            Some(slot) => {
                slot.width = width;
                slot.height = height;
                slot.rgba = rgba.to_vec();
                slot.updates += 1;
            }
            None => log::warn!("update_texture: unknown handle {texture:?}"),
        }
    }

    fn begin_frame(&mut self, state: &RenderState) {
        self.frames.push(*state);
    }

    fn draw(&mut self, call: &DrawCall<'_>) {
        self.draws.push(RecordedDraw {
            geometry: call.geometry,
            index_count: call.index_count,
            mode: call.mode,
            model: call.model,
            material: call.material.clone(),
            frame: self.frame_count(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::WHITE_TEXEL;

    #[test]
    fn handles_are_sequential_per_kind() {
        let mut recorder = CommandRecorder::new();
        let a = recorder.create_buffer(BufferData::Attribute(&[0.0; 9]));
        let b = recorder.create_buffer(BufferData::Index(&[0, 1, 2]));
        assert_ne!(a, b);
        assert_eq!(recorder.buffer_len(a), Some(9));
        assert_eq!(recorder.buffers()[1].kind, BufferKind::Index);
    }

    #[test]
    fn texture_contents_change_behind_a_stable_handle() {
        let mut recorder = CommandRecorder::new();
        let handle = recorder.create_texture(1, 1, &WHITE_TEXEL);
        recorder.update_texture(handle, 2, 1, &[0; 8]);
        let texture = recorder.texture(handle).unwrap();
        assert_eq!((texture.width, texture.height, texture.updates), (2, 1, 1));
        assert_eq!(recorder.texture_count(), 1);
    }

    #[test]
    fn draws_are_grouped_by_frame() {
        let mut recorder = CommandRecorder::new();
        let buffer = recorder.create_buffer(BufferData::Index(&[0]));
        let geometry = GeometryBuffers {
            positions: buffer,
            normals: buffer,
            tex_coords: buffer,
            indices: buffer,
        };
        let material = Material::default();
        let call = DrawCall {
            geometry,
            index_count: 1,
            mode: DrawMode::Triangles,
            model: Mat4::IDENTITY,
            material: &material,
        };

        recorder.begin_frame(&RenderState::default());
        recorder.draw(&call);
        recorder.draw(&call);
        recorder.begin_frame(&RenderState::default());
        recorder.draw(&call);

        assert_eq!(recorder.frame_count(), 2);
        assert_eq!(recorder.draws().len(), 3);
        assert_eq!(recorder.last_frame_draws().len(), 1);
    }
}
