//! Demo configuration.
//!
//! [`DemoConfig`] is read from a JSON file (`assets/orrery.json` for the
//! bundled demos). Every field has a default, so a partial file, or none
//! at all, works:
//!
//! ```json
//! {
//!   "title": "orrery",
//!   "clear_color": [46, 36, 63],
//!   "actions": { "moveForward": "w", "shift": "Shift" }
//! }
//! ```
//!
//! `actions` replaces the built-in bindings wholesale when present.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::{Input, actions};
use crate::math::Color;

/// Window, input and asset settings for the demo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Wait for vertical blank when presenting.
    pub vsync: bool,
    /// Background colour as 8-bit RGB.
    pub clear_color: [u8; 3],
    /// Treat `"a"` and `"A"` as different keys.
    pub case_sensitive_input: bool,
    /// Action name → key.
    pub actions: BTreeMap<String, String>,
    /// Directory holding textures, meshes and skybox faces. Relative paths
    /// resolve against the config file's directory.
    pub assets_dir: PathBuf,
}

impl DemoConfig {
    /// Read a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mut config: Self = serde_json::from_str(&text)?;
        if config.assets_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.assets_dir = parent.join(&config.assets_dir);
            }
        }
        log::info!("Loaded config from '{}'", path.display());
        Ok(config)
    }

    /// Read a config file if it exists, otherwise fall back to defaults.
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("No config at '{}'; using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn clear_color(&self) -> Color {
        let [r, g, b] = self.clear_color;
        Color::from_u8(r, g, b)
    }

    /// Build the input action map from `actions`.
    pub fn input(&self) -> Input {
        Input::from_bindings(
            self.actions.iter().map(|(action, key)| (action.clone(), key.as_str())),
            self.case_sensitive_input,
        )
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "orrery".into(),
            width: 1280,
            height: 720,
            vsync: true,
            clear_color: [46, 36, 63],
            case_sensitive_input: false,
            actions: default_bindings(),
            assets_dir: PathBuf::from("assets"),
        }
    }
}

/// The built-in key bindings.
pub fn default_bindings() -> BTreeMap<String, String> {
    [
        (actions::MOVE_FORWARD, "w"),
        (actions::MOVE_BACK, "s"),
        (actions::MOVE_LEFT, "a"),
        (actions::MOVE_RIGHT, "d"),
        (actions::LIGHT_MOVE_FORWARD, "i"),
        (actions::LIGHT_MOVE_BACK, "k"),
        (actions::LIGHT_MOVE_LEFT, "j"),
        (actions::LIGHT_MOVE_RIGHT, "l"),
        (actions::LIGHT_MOVE_UP, "o"),
        (actions::LIGHT_MOVE_DOWN, "u"),
        (actions::YAW, "x"),
        (actions::PITCH, "y"),
        (actions::ROLL, "z"),
        (actions::SHIFT, "Shift"),
        (actions::RESET, "r"),
        (actions::TOGGLE_WIREFRAME, "f"),
        (actions::HUD_TOGGLE, "h"),
    ]
    .into_iter()
    .map(|(action, key)| (action.to_owned(), key.to_owned()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_every_builtin_action() {
        let input = DemoConfig::default().input();
        for action in [
            actions::MOVE_FORWARD,
            actions::LIGHT_MOVE_UP,
            actions::YAW,
            actions::SHIFT,
            actions::RESET,
            actions::TOGGLE_WIREFRAME,
            actions::HUD_TOGGLE,
        ] {
            assert!(input.is_action_up(action), "{action} should be bound");
        }
    }

    #[test]
    fn default_clear_color() {
        let color = DemoConfig::default().clear_color();
        assert_eq!(color, Color::from_u8(46, 36, 63));
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config: DemoConfig = serde_json::from_str(r#"{ "title": "test", "width": 640 }"#).unwrap();
        assert_eq!(config.title, "test");
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 720);
        assert!(config.vsync);
        assert_eq!(config.actions, default_bindings());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = DemoConfig::load_or_default("/nonexistent/orrery.json").unwrap();
        assert_eq!(config, DemoConfig::default());
    }

    #[test]
    fn bundled_config_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/orrery.json");
        let config = DemoConfig::load(&path).unwrap();
        assert!(config.assets_dir.ends_with("assets"));
        assert!(config.input().key_for(actions::HUD_TOGGLE).is_some());
    }
}
