//! App builder.
//!
//! [`App`] is the entry point for the windowed demo. Give it a
//! [`DemoConfig`], then call [`run`](App::run) to open the window and start
//! the frame loop.
//!
//! # Example
//!
//! ```ignore
//! use orrery::prelude::*;
//!
//! fn main() -> orrery::Result<()> {
//!     env_logger::init();
//!     let config = DemoConfig::load_or_default("assets/orrery.json")?;
//!     App::new(config).run()
//! }
//! ```

use crate::config::DemoConfig;
use crate::error::{OrreryError, Result};
use crate::scene::SceneAssets;

/// Windowed demo builder.
pub struct App {
    config: DemoConfig,
    assets: Option<SceneAssets>,
}

impl App {
    pub fn new(config: DemoConfig) -> Self {
        Self { config, assets: None }
    }

    /// Use these assets instead of loading them from the configured
    /// directory.
    pub fn with_assets(mut self, assets: SceneAssets) -> Self {
        self.assets = Some(assets);
        self
    }

    /// Open the window and run until it is closed.
    ///
    /// Returns the error that stopped the demo if window, GPU or scene setup
    /// failed.
    pub fn run(self) -> Result<()> {
        let assets = match self.assets {
            Some(assets) => assets,
            None => SceneAssets::load(&self.config.assets_dir)?,
        };

        let event_loop = winit::event_loop::EventLoop::new()
            .map_err(|e| OrreryError::Backend(format!("cannot create event loop: {e}")))?;

        let mut app = crate::window::WinitApp::new(self.config, assets);
        event_loop
            .run_app(&mut app)
            .map_err(|e| OrreryError::Backend(format!("event loop error: {e}")))?;

        match app.into_error() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
