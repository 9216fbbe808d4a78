//! The wgpu device and the window surface it presents to.
//!
//! [`GpuContext`] is created once the window exists and is owned by the
//! [`WgpuBackend`](super::WgpuBackend). Setup failures come back as
//! [`OrreryError::Backend`]; the window loop logs them and exits.

use std::sync::Arc;

use winit::window::Window;

use crate::error::{OrreryError, Result};

/// Device, queue and configured surface.
pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
}

impl GpuContext {
    /// Pick an adapter that can present to `window`, open a device on it and
    /// configure the surface at the window's current size.
    pub fn new(window: Arc<Window>, vsync: bool) -> Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window).map_err(backend_error("create surface"))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(backend_error("find a GPU adapter"))?;
        let info = adapter.get_info();
        log::info!("GPU adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("orrery device"),
            ..Default::default()
        }))
        .map_err(backend_error("open the GPU device"))?;

        let surface_config = surface_config(&surface.get_capabilities(&adapter), size.width, size.height, vsync)?;
        surface.configure(&device, &surface_config);
        log::debug!(
            "Surface {}x{} {:?}, {:?}",
            surface_config.width,
            surface_config.height,
            surface_config.format,
            surface_config.present_mode
        );

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
        })
    }

    /// Follow a window resize. A minimized window (zero size) keeps the old
    /// configuration.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.surface_config.width = width;
            self.surface_config.height = height;
            self.reconfigure();
        }
    }

    /// Re-apply the current configuration, after the surface was lost or
    /// went out of date.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.surface_config);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }

    pub fn surface_size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }

    /// Width / height of the surface.
    pub fn aspect(&self) -> f32 {
        let (width, height) = self.surface_size();
        width as f32 / height.max(1) as f32
    }
}

/// An sRGB format when the surface offers one, the surface's first alpha
/// mode, and a vsync or no-vsync present mode.
fn surface_config(
    caps: &wgpu::SurfaceCapabilities,
    width: u32,
    height: u32,
    vsync: bool,
) -> Result<wgpu::SurfaceConfiguration> {
    let format = caps
        .formats
        .iter()
        .find(|f| f.is_srgb())
        .or_else(|| caps.formats.first())
        .copied()
        .ok_or_else(|| OrreryError::Backend("surface reports no formats".into()))?;

    Ok(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: width.max(1),
        height: height.max(1),
        present_mode: if vsync { wgpu::PresentMode::AutoVsync } else { wgpu::PresentMode::AutoNoVsync },
        alpha_mode: caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    })
}

fn backend_error<E: std::fmt::Display>(what: &'static str) -> impl FnOnce(E) -> OrreryError {
    move |e| OrreryError::Backend(format!("cannot {what}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(formats: Vec<wgpu::TextureFormat>) -> wgpu::SurfaceCapabilities {
        wgpu::SurfaceCapabilities {
            formats,
            ..Default::default()
        }
    }

    #[test]
    fn prefers_srgb_formats() {
        let caps = caps(vec![wgpu::TextureFormat::Bgra8Unorm, wgpu::TextureFormat::Bgra8UnormSrgb]);
        let config = surface_config(&caps, 800, 600, true).unwrap();
        assert_eq!(config.format, wgpu::TextureFormat::Bgra8UnormSrgb);
        assert_eq!(config.present_mode, wgpu::PresentMode::AutoVsync);
        assert_eq!(Some(&config.alpha_mode), caps.alpha_modes.first().or(Some(&wgpu::CompositeAlphaMode::Auto)));
    }

    #[test]
    fn falls_back_to_first_format_and_clamps_size() {
        let caps = caps(vec![wgpu::TextureFormat::Rgba8Unorm]);
        let config = surface_config(&caps, 0, 0, false).unwrap();
        assert_eq!(config.format, wgpu::TextureFormat::Rgba8Unorm);
        assert_eq!((config.width, config.height), (1, 1));
        assert_eq!(config.present_mode, wgpu::PresentMode::AutoNoVsync);
    }

    #[test]
    fn no_formats_is_an_error() {
        assert!(matches!(surface_config(&caps(vec![]), 1, 1, true), Err(OrreryError::Backend(_))));
    }
}
