//! # Input: Named Actions Over Keyboard State
//!
//! Game logic never asks "is W held?". It asks "is `moveForward` held?".
//! [`Input`] keeps two tables:
//!
//! ```text
//!   action name ──► key          "moveForward" ──► "W"
//!   key         ──► KeyState     "W"           ──► Down
//! ```
//!
//! The window event handler is the only writer ([`press_key`](Input::press_key),
//! [`release_key`](Input::release_key), [`reset`](Input::reset)); components
//! only read, during update. Both happen on the event-loop thread and never
//! interleave, so no locking is involved.
//!
//! ## Keys
//!
//! Keys are the *logical* key strings the platform reports: `"w"`, `"W"`,
//! `"Shift"`, `" "`. With case-insensitive input (the default) the first
//! character of every key is upper-cased on registration and on every event,
//! so holding Shift does not change which action a letter drives. With
//! case-sensitive input `"a"` and `"A"` are different keys.
//!
//! ## Errors
//!
//! Configuration mistakes are logged and ignored:
//! - registering an action name twice keeps the first binding
//! - binding a second action to an already-bound key keeps the first
//! - querying an unregistered action logs and reports the action as
//!   neither up nor down
//!
//! Events for keys nobody is bound to are dropped silently.

use std::collections::HashMap;

/// Action names used by the built-in components.
pub mod actions {
    pub const MOVE_FORWARD: &str = "moveForward";
    pub const MOVE_BACK: &str = "moveBack";
    pub const MOVE_LEFT: &str = "moveLeft";
    pub const MOVE_RIGHT: &str = "moveRight";

    pub const LIGHT_MOVE_FORWARD: &str = "lightMoveForward";
    pub const LIGHT_MOVE_BACK: &str = "lightMoveBack";
    pub const LIGHT_MOVE_LEFT: &str = "lightMoveLeft";
    pub const LIGHT_MOVE_RIGHT: &str = "lightMoveRight";
    pub const LIGHT_MOVE_UP: &str = "lightMoveUp";
    pub const LIGHT_MOVE_DOWN: &str = "lightMoveDown";

    pub const YAW: &str = "yaw";
    pub const PITCH: &str = "pitch";
    pub const ROLL: &str = "roll";

    pub const SHIFT: &str = "shift";
    pub const RESET: &str = "reset";
    pub const TOGGLE_WIREFRAME: &str = "toggleWireframe";
    pub const HUD_TOGGLE: &str = "hudToggle";
}

/// State of one bound key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyState {
    #[default]
    Up,
    Down,
}

/// Action map plus the current state of every bound key.
#[derive(Debug, Clone, Default)]
pub struct Input {
    actions: HashMap<String, String>,
    keys: HashMap<String, KeyState>,
    case_sensitive: bool,
}

impl Input {
    /// An empty action map.
    pub fn new(case_sensitive: bool) -> Self {
        Self {
            actions: HashMap::new(),
            keys: HashMap::new(),
            case_sensitive,
        }
    }

    /// Build an action map from `(action, key)` pairs.
    ///
    /// Duplicates are logged and skipped, see [`add_action`](Self::add_action).
    pub fn from_bindings<I, A, K>(bindings: I, case_sensitive: bool) -> Self
    where
        I: IntoIterator<Item = (A, K)>,
        A: Into<String>,
        K: AsRef<str>,
    {
        let mut input = Self::new(case_sensitive);
        for (action, key) in bindings {
            input.add_action(action, key.as_ref());
        }
        input
    }

    /// Bind `action` to `key`. The key starts out up.
    ///
    /// Returns `false` (and logs) if the action or the key is already bound.
    pub fn add_action(&mut self, action: impl Into<String>, key: &str) -> bool {
        let action = action.into();
        let key = self.normalize(key);
        if self.actions.contains_key(&action) {
            log::error!("Input already recognizes action: {action}");
            return false;
        }
        if self.keys.contains_key(&key) {
            log::error!("Input already recognizes key: {key}");
            return false;
        }
        self.keys.insert(key.clone(), KeyState::Up);
        self.actions.insert(action, key);
        true
    }

    /// `true` if the action's key is held. Unknown actions are never down.
    pub fn is_action_down(&self, action: &str) -> bool {
        self.action_state(action) == Some(KeyState::Down)
    }

    /// `true` if the action's key is released. Unknown actions are never up.
    pub fn is_action_up(&self, action: &str) -> bool {
        self.action_state(action) == Some(KeyState::Up)
    }

    /// The key bound to `action`, after case normalization.
    pub fn key_for(&self, action: &str) -> Option<&str> {
        self.actions.get(action).map(String::as_str)
    }

    /// Record a key-down event.
    pub fn press_key(&mut self, key: &str) {
        self.set_key(key, KeyState::Down);
    }

    /// Record a key-up event.
    pub fn release_key(&mut self, key: &str) {
        self.set_key(key, KeyState::Up);
    }

    /// Release every bound key. Called when the window gains or loses
    /// focus, since key-up events are not delivered while unfocused.
    pub fn reset(&mut self) {
        for state in self.keys.values_mut() {
            *state = KeyState::Up;
        }
    }

    fn action_state(&self, action: &str) -> Option<KeyState> {
        let Some(key) = self.actions.get(action) else {
            log::error!("Input doesn't recognize action: {action}");
            return None;
        };
        self.keys.get(key).copied()
    }

    fn set_key(&mut self, key: &str, state: KeyState) {
        let key = self.normalize(key);
        if let Some(slot) = self.keys.get_mut(&key) {
            *slot = state;
        }
    }

    fn normalize(&self, key: &str) -> String {
        if self.case_sensitive {
            return key.to_owned();
        }
        let mut chars = key.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings() -> Input {
        Input::from_bindings(
            [(actions::MOVE_FORWARD, "w"), (actions::SHIFT, "Shift"), (actions::HUD_TOGGLE, "h")],
            false,
        )
    }

    #[test]
    fn keys_start_up() {
        let input = bindings();
        assert!(input.is_action_up(actions::MOVE_FORWARD));
        assert!(!input.is_action_down(actions::MOVE_FORWARD));
    }

    #[test]
    fn press_and_release() {
        let mut input = bindings();
        input.press_key("w");
        assert!(input.is_action_down(actions::MOVE_FORWARD));
        input.release_key("w");
        assert!(input.is_action_up(actions::MOVE_FORWARD));
    }

    #[test]
    fn case_insensitive_matches_shifted_letters() {
        let mut input = bindings();
        input.press_key("W");
        assert!(input.is_action_down(actions::MOVE_FORWARD));
        input.release_key("w");
        assert!(input.is_action_up(actions::MOVE_FORWARD));
        assert_eq!(input.key_for(actions::MOVE_FORWARD), Some("W"));
    }

    #[test]
    fn case_sensitive_keeps_letters_apart() {
        let mut input = Input::from_bindings([("lower", "a"), ("upper", "A")], true);
        input.press_key("A");
        assert!(input.is_action_down("upper"));
        assert!(input.is_action_up("lower"));
    }

    #[test]
    fn duplicate_action_keeps_first_binding() {
        let mut input = bindings();
        assert!(!input.add_action(actions::MOVE_FORWARD, "x"));
        assert_eq!(input.key_for(actions::MOVE_FORWARD), Some("W"));
        input.press_key("x");
        assert!(input.is_action_up(actions::MOVE_FORWARD));
    }

    #[test]
    fn duplicate_key_is_rejected() {
        let mut input = bindings();
        assert!(!input.add_action("other", "W"));
        assert_eq!(input.key_for("other"), None);
    }

    #[test]
    fn unknown_action_is_neither_up_nor_down() {
        let input = bindings();
        assert!(!input.is_action_down("fly"));
        assert!(!input.is_action_up("fly"));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut input = bindings();
        input.press_key("q");
        assert!(input.is_action_up(actions::MOVE_FORWARD));
    }

    #[test]
    fn reset_releases_everything() {
        let mut input = bindings();
        input.press_key("w");
        input.press_key("Shift");
        input.reset();
        assert!(input.is_action_up(actions::MOVE_FORWARD));
        assert!(input.is_action_up(actions::SHIFT));
    }
}
