//! # WgpuBackend: RenderBackend on wgpu
//!
//! Draw calls are not issued as they arrive. While the world renders, each
//! [`DrawCall`] is reduced to a small queued record holding its buffers,
//! albedo texture and object uniform. [`WgpuBackend::present`] then writes
//! every uniform into the dynamic object buffer at once and records a
//! single render pass:
//!
//! ```text
//! begin_frame(state)     store RenderState, clear the queue
//! draw(call)  × N        queue (geometry, albedo, ObjectUniform)
//! present()
//!   ├─ write FrameUniform, SkyUniform, N × ObjectUniform
//!   ├─ pass: clear colour + depth 1.0
//!   │    ├─ skybox (fullscreen triangle, no depth write)
//!   │    └─ N × draw_indexed, pipeline chosen by DrawMode
//!   └─ submit + present
//! ```

use std::path::Path;

use wgpu::util::DeviceExt;

use super::gpu::GpuContext;
use super::pipeline::{SceneRenderer, SkyboxRenderer};
use super::vertex::{FrameUniform, ObjectUniform, SkyUniform};
use super::{
    BufferData, BufferHandle, DrawCall, DrawMode, GeometryBuffers, RenderBackend, RenderState, TextureHandle,
    WHITE_TEXEL,
};
use crate::asset::{CubeFaces, load_cube_faces};
use crate::math::Color;

struct GpuTexture {
    // Kept alive for the bind group's view.
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

struct QueuedDraw {
    geometry: GeometryBuffers,
    index_count: u32,
    mode: DrawMode,
    albedo: Option<TextureHandle>,
    uniform: ObjectUniform,
}

/// Renders the scene into a window surface.
pub struct WgpuBackend {
    gpu: GpuContext,
    scene: SceneRenderer,
    skybox: SkyboxRenderer,
    buffers: Vec<wgpu::Buffer>,
    textures: Vec<GpuTexture>,
    white: GpuTexture,
    state: RenderState,
    queue: Vec<QueuedDraw>,
}

impl WgpuBackend {
    /// Build the pipelines and load the skybox faces from `assets_dir`.
    ///
    /// Missing or mismatched faces are logged and replaced by a flat cube
    /// of `clear_color`.
    pub fn new(gpu: GpuContext, assets_dir: &Path, clear_color: Color) -> Self {
        let scene = SceneRenderer::new(&gpu);

        let faces = match load_cube_faces(assets_dir) {
            Ok(faces) => {
                log::info!("Loaded skybox from '{}' ({}px faces)", assets_dir.display(), faces.size);
                faces
            }
            Err(e) => {
                log::warn!("No skybox in '{}': {e}; using a flat background", assets_dir.display());
                CubeFaces::solid(clear_color)
            }
        };
        let skybox = SkyboxRenderer::new(&gpu, faces.size, &faces.rgba);

        let white = upload_texture(&gpu, &scene, 1, 1, &WHITE_TEXEL);

        Self {
            gpu,
            scene,
            skybox,
            buffers: Vec::new(),
            textures: Vec::new(),
            white,
            state: RenderState::default(),
            queue: Vec::new(),
        }
    }

    pub fn gpu(&self) -> &GpuContext {
        &self.gpu
    }

    /// Width / height of the window surface.
    pub fn aspect(&self) -> f32 {
        self.gpu.aspect()
    }

    /// Resize the surface and the depth buffer.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
        self.scene.resize_depth_if_needed(&self.gpu.device, width, height);
    }

    /// Reconfigure the surface at its current size, after it was lost.
    pub fn reconfigure(&mut self) {
        self.gpu.reconfigure();
    }

    /// Draw everything queued since [`begin_frame`](RenderBackend::begin_frame)
    /// and present it.
    pub fn present(&mut self) -> Result<(), wgpu::SurfaceError> {
        let draws = std::mem::take(&mut self.queue);

        let output = self.gpu.surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let frame = FrameUniform::from_state(&self.state);
        self.gpu
            .queue
            .write_buffer(&self.scene.frame_buffer, 0, bytemuck::bytes_of(&frame));
        self.skybox.write(
            &self.gpu.queue,
            &SkyUniform {
                inv_view_proj: self.state.sky_matrix().to_cols_array_2d(),
            },
        );

        let stride = self.scene.ensure_object_capacity(&self.gpu.device, draws.len());
        for (i, draw) in draws.iter().enumerate() {
            let offset = i as u64 * stride as u64;
            self.gpu
                .queue
                .write_buffer(&self.scene.object_buffer, offset, bytemuck::bytes_of(&draw.uniform));
        }

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("orrery frame encoder"),
            });

        {
            let [r, g, b, a] = self.state.clear_color.to_array().map(f64::from);
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.scene.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.skybox.draw(&mut pass);

            pass.set_bind_group(0, &self.scene.frame_bind_group, &[]);
            for (i, draw) in draws.iter().enumerate() {
                let (Some(positions), Some(normals), Some(tex_coords), Some(indices)) = (
                    self.buffer(draw.geometry.positions),
                    self.buffer(draw.geometry.normals),
                    self.buffer(draw.geometry.tex_coords),
                    self.buffer(draw.geometry.indices),
                ) else {
                    log::warn!("Skipping draw with unknown buffers: {:?}", draw.geometry);
                    continue;
                };
                let albedo = draw
                    .albedo
                    .and_then(|handle| self.textures.get(handle.0))
                    .unwrap_or(&self.white);

                pass.set_pipeline(self.scene.pipeline(draw.mode));
                pass.set_bind_group(1, &albedo.bind_group, &[]);
                pass.set_bind_group(2, &self.scene.object_bind_group, &[i as u32 * stride]);
                pass.set_vertex_buffer(0, positions.slice(..));
                pass.set_vertex_buffer(1, normals.slice(..));
                pass.set_vertex_buffer(2, tex_coords.slice(..));
                pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..draw.index_count, 0, 0..1);
            }
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn buffer(&self, handle: BufferHandle) -> Option<&wgpu::Buffer> {
        self.buffers.get(handle.0)
    }
}

impl RenderBackend for WgpuBackend {
    fn create_buffer(&mut self, data: BufferData<'_>) -> BufferHandle {
        let (contents, usage): (&[u8], _) = match data {
            BufferData::Attribute(floats) => (bytemuck::cast_slice(floats), wgpu::BufferUsages::VERTEX),
            BufferData::Index(indices) => (bytemuck::cast_slice(indices), wgpu::BufferUsages::INDEX),
        };
        let buffer = self.gpu.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("geometry buffer"),
            contents,
            usage,
        });
        self.buffers.push(buffer);
        BufferHandle(self.buffers.len() - 1)
    }

    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> TextureHandle {
        let texture = upload_texture(&self.gpu, &self.scene, width, height, rgba);
        self.textures.push(texture);
        TextureHandle(self.textures.len() - 1)
    }

    fn update_texture(&mut self, texture: TextureHandle, width: u32, height: u32, rgba: &[u8]) {
        let replacement = upload_texture(&self.gpu, &self.scene, width, height, rgba);
        match self.textures.get_mut(texture.0) {
            Some(slot) => *slot = replacement,
            None => log::error!("update_texture: unknown texture {texture:?}"),
        }
    }

    fn begin_frame(&mut self, state: &RenderState) {
        self.scene
            .resize_depth_if_needed(&self.gpu.device, self.gpu.surface_config.width, self.gpu.surface_config.height);
        self.state = *state;
        self.queue.clear();
    }

    fn draw(&mut self, call: &DrawCall<'_>) {
        if call.index_count == 0 {
            return;
        }
        self.queue.push(QueuedDraw {
            geometry: call.geometry,
            index_count: call.index_count,
            mode: call.mode,
            albedo: call.material.albedo,
            uniform: ObjectUniform::new(call.model, call.material),
        });
    }
}

/// Upload RGBA8 pixels as an sRGB texture with its bind group. Pixel data
/// that does not match the size is logged and replaced by a white texel.
fn upload_texture(gpu: &GpuContext, scene: &SceneRenderer, width: u32, height: u32, rgba: &[u8]) -> GpuTexture {
    let expected = width as usize * height as usize * 4;
    let (width, height, rgba) = if width == 0 || height == 0 || rgba.len() != expected {
        log::error!(
            "Texture data is {} bytes, expected {expected} for {width}x{height}; using white",
            rgba.len()
        );
        (1, 1, &WHITE_TEXEL[..])
    } else {
        (width, height, rgba)
    };

    let texture = gpu.device.create_texture_with_data(
        &gpu.queue,
        &wgpu::TextureDescriptor {
            label: Some("albedo texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        },
        wgpu::util::TextureDataOrder::LayerMajor,
        rgba,
    );
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let bind_group = scene.texture_bind_group(&gpu.device, &view);
    GpuTexture {
        _texture: texture,
        bind_group,
    }
}
