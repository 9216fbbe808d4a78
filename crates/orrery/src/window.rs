//! Window management via winit.
//!
//! Implements [`winit::application::ApplicationHandler`] to drive the event
//! loop. This handles window creation, keyboard forwarding, resize, and the
//! frame loop (update + render each redraw).

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use crate::asset::TextureLoader;
use crate::component::Component;
use crate::config::DemoConfig;
use crate::error::{OrreryError, Result};
use crate::input::Input;
use crate::render::{GpuContext, WgpuBackend};
use crate::scene::SceneAssets;
use crate::time::FrameClock;
use crate::world::World;

/// Everything that exists only once the window does.
struct Running {
    window: Arc<Window>,
    backend: WgpuBackend,
    world: World,
}

/// The application state that winit drives.
pub(crate) struct WinitApp {
    config: DemoConfig,
    assets: SceneAssets,
    input: Input,
    clock: FrameClock,
    textures: TextureLoader,
    running: Option<Running>,
    title: String,
    error: Option<OrreryError>,
}

impl WinitApp {
    pub fn new(config: DemoConfig, assets: SceneAssets) -> Self {
        let input = config.input();
        let title = config.title.clone();
        Self {
            config,
            assets,
            input,
            clock: FrameClock::new(),
            textures: TextureLoader::new(),
            running: None,
            title,
            error: None,
        }
    }

    /// The setup error that ended the event loop, if any.
    pub fn into_error(self) -> Option<OrreryError> {
        self.error
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<Running> {
        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| OrreryError::Backend(format!("cannot create window: {e}")))?,
        );

        let gpu = GpuContext::new(window.clone(), self.config.vsync)?;
        let mut backend = WgpuBackend::new(gpu, &self.config.assets_dir, self.config.clear_color());
        let world = World::create(&mut backend, &mut self.textures, &self.assets)?;

        log::info!("Window created ({}x{})", self.config.width, self.config.height);
        Ok(Running { window, backend, world })
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(running) = &mut self.running else {
            return;
        };

        let delta = self.clock.tick();
        if self.clock.frame_count() % 600 == 0 {
            log::debug!("{:.1} fps", self.clock.fps());
        }
        self.textures.poll(&mut running.backend);
        running.world.update(delta, &self.input);
        let aspect = running.backend.aspect();
        running
            .world
            .draw_frame(&mut running.backend, aspect, self.config.clear_color());

        match running.backend.present() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                running.backend.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of GPU memory!");
                event_loop.exit();
            }
            Err(e) => {
                log::warn!("Surface error: {:?}", e);
            }
        }

        if let Some(text) = overlay_text(&running.world) {
            let title = format!("{} | {text}", self.config.title);
            if title != self.title {
                running.window.set_title(&title);
                self.title = title;
            }
        }

        // Request next frame.
        running.window.request_redraw();
    }
}

impl ApplicationHandler for WinitApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() || self.error.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(running) => {
                running.window.request_redraw();
                self.running = Some(running);
            }
            Err(e) => {
                log::error!("Failed to start: {e}");
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(running) = &mut self.running {
                    running.backend.resize(size.width, size.height);
                }
            }

            // Key-up events are not delivered while unfocused.
            WindowEvent::Focused(_) => self.input.reset(),

            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(key) = key_name(&event.logical_key) {
                    match event.state {
                        ElementState::Pressed => self.input.press_key(&key),
                        ElementState::Released => self.input.release_key(&key),
                    }
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

/// The key string bindings refer to: the typed character, or the key's name
/// for named keys (`"Shift"`, `"Enter"`, `"ArrowUp"`). Space is `" "`.
fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Character(text) => Some(text.to_string()),
        Key::Named(NamedKey::Space) => Some(" ".to_owned()),
        Key::Named(named) => Some(format!("{named:?}")),
        _ => None,
    }
}

fn overlay_text(world: &World) -> Option<&str> {
    world.iter().find_map(|(_, entity)| {
        entity
            .components()
            .iter()
            .find_map(Component::as_overlay_hider)
            .map(|hider| hider.visible_region().text.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_match_binding_strings() {
        assert_eq!(key_name(&Key::Character("w".into())).as_deref(), Some("w"));
        assert_eq!(key_name(&Key::Named(NamedKey::Shift)).as_deref(), Some("Shift"));
        assert_eq!(key_name(&Key::Named(NamedKey::Space)).as_deref(), Some(" "));
    }
}
