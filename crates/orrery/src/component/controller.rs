//! Keyboard-driven controllers.
//!
//! Both controllers snapshot their owner's state at construction time and
//! restore it when `reset` is held. Reset is evaluated after the motion for
//! the frame has been applied, so holding reset together with any motion
//! key always ends the frame exactly at the snapshot.

use crate::input::{Input, actions};
use crate::math::{Quat, Vec3};
use crate::spatial::Spatial;

/// Rotates its owner about its local axes while yaw / pitch / roll are held.
///
/// The axis mapping is fixed: yaw turns about X, pitch about Y, roll about
/// Z. Holding shift turns in the positive direction, otherwise negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationController {
    yaw_speed: f32,
    pitch_speed: f32,
    roll_speed: f32,
    initial_rotation: Quat,
}

impl RotationController {
    /// Speeds are in radians per second. `initial_rotation` is what reset
    /// restores.
    pub fn new(yaw_speed: f32, pitch_speed: f32, roll_speed: f32, initial_rotation: Quat) -> Self {
        Self {
            yaw_speed,
            pitch_speed,
            roll_speed,
            initial_rotation,
        }
    }

    pub fn initial_rotation(&self) -> Quat {
        self.initial_rotation
    }

    pub(crate) fn update(&self, delta: f32, spatial: &mut Spatial, input: &Input) {
        let sign = if input.is_action_down(actions::SHIFT) { 1.0 } else { -1.0 };

        if input.is_action_down(actions::YAW) {
            spatial.rotate_x(sign * self.yaw_speed * delta);
        }
        if input.is_action_down(actions::PITCH) {
            spatial.rotate_y(sign * self.pitch_speed * delta);
        }
        if input.is_action_down(actions::ROLL) {
            spatial.rotate_z(sign * self.roll_speed * delta);
        }

        if input.is_action_down(actions::RESET) {
            spatial.rotation = self.initial_rotation;
        }
    }
}

/// Which actions drive a [`MovementController`].
///
/// Vertical actions are optional: the camera moves in its local XZ plane,
/// the light can also move up and down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementBindings {
    pub forward: &'static str,
    pub back: &'static str,
    pub left: &'static str,
    pub right: &'static str,
    pub up: Option<&'static str>,
    pub down: Option<&'static str>,
}

impl MovementBindings {
    pub const CAMERA: Self = Self {
        forward: actions::MOVE_FORWARD,
        back: actions::MOVE_BACK,
        left: actions::MOVE_LEFT,
        right: actions::MOVE_RIGHT,
        up: None,
        down: None,
    };

    pub const LIGHT: Self = Self {
        forward: actions::LIGHT_MOVE_FORWARD,
        back: actions::LIGHT_MOVE_BACK,
        left: actions::LIGHT_MOVE_LEFT,
        right: actions::LIGHT_MOVE_RIGHT,
        up: Some(actions::LIGHT_MOVE_UP),
        down: Some(actions::LIGHT_MOVE_DOWN),
    };
}

/// Translates its owner at a fixed speed while movement actions are held.
///
/// Forward is -Z and right is +X, in the owner's parent space. The summed
/// direction is normalized, so diagonals are not faster; opposite keys
/// cancel to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementController {
    speed: f32,
    initial_translation: Vec3,
    bindings: MovementBindings,
}

impl MovementController {
    /// A camera-style controller (no vertical movement).
    pub fn new(speed: f32, initial_translation: Vec3) -> Self {
        Self::with_bindings(speed, initial_translation, MovementBindings::CAMERA)
    }

    /// A light-style controller, with up / down.
    pub fn light(speed: f32, initial_translation: Vec3) -> Self {
        Self::with_bindings(speed, initial_translation, MovementBindings::LIGHT)
    }

    pub fn with_bindings(speed: f32, initial_translation: Vec3, bindings: MovementBindings) -> Self {
        Self {
            speed,
            initial_translation,
            bindings,
        }
    }

    pub fn initial_translation(&self) -> Vec3 {
        self.initial_translation
    }

    pub fn bindings(&self) -> &MovementBindings {
        &self.bindings
    }

    pub(crate) fn update(&self, delta: f32, spatial: &mut Spatial, input: &Input) {
        let held = |action: &str| input.is_action_down(action);
        let b = &self.bindings;

        let mut direction = Vec3::ZERO;
        if held(b.forward) {
            direction -= Vec3::Z;
        }
        if held(b.back) {
            direction += Vec3::Z;
        }
        if held(b.left) {
            direction -= Vec3::X;
        }
        if held(b.right) {
            direction += Vec3::X;
        }
        if b.up.is_some_and(held) {
            direction += Vec3::Y;
        }
        if b.down.is_some_and(held) {
            direction -= Vec3::Y;
        }
        spatial.translate(direction.normalize_or_zero() * (self.speed * delta));

        if held(actions::RESET) {
            spatial.translation = self.initial_translation;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::FRAC_PI_2;

    fn input() -> Input {
        Input::from_bindings(
            [
                (actions::MOVE_FORWARD, "w"),
                (actions::MOVE_BACK, "s"),
                (actions::MOVE_LEFT, "a"),
                (actions::MOVE_RIGHT, "d"),
                (actions::LIGHT_MOVE_UP, "o"),
                (actions::LIGHT_MOVE_DOWN, "u"),
                (actions::LIGHT_MOVE_FORWARD, "i"),
                (actions::LIGHT_MOVE_BACK, "k"),
                (actions::LIGHT_MOVE_LEFT, "j"),
                (actions::LIGHT_MOVE_RIGHT, "l"),
                (actions::YAW, "x"),
                (actions::PITCH, "y"),
                (actions::ROLL, "z"),
                (actions::SHIFT, "Shift"),
                (actions::RESET, "r"),
            ],
            false,
        )
    }

    #[test]
    fn forward_moves_along_negative_z() {
        let mut input = input();
        input.press_key("w");
        let controller = MovementController::new(10.0, Vec3::new(0.0, 0.0, 6.0));
        let mut spatial = Spatial::from_xyz(0.0, 0.0, 6.0);
        controller.update(0.1, &mut spatial, &input);
        assert!(spatial.translation.abs_diff_eq(Vec3::new(0.0, 0.0, 5.0), 1e-6));
    }

    #[test]
    fn diagonal_is_normalized() {
        let mut input = input();
        input.press_key("w");
        input.press_key("d");
        let controller = MovementController::new(1.0, Vec3::ZERO);
        let mut spatial = Spatial::default();
        controller.update(1.0, &mut spatial, &input);
        assert_abs_diff_eq!(spatial.translation.length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut input = input();
        input.press_key("a");
        input.press_key("d");
        let controller = MovementController::new(10.0, Vec3::ZERO);
        let mut spatial = Spatial::default();
        controller.update(1.0, &mut spatial, &input);
        assert_eq!(spatial.translation, Vec3::ZERO);
    }

    #[test]
    fn camera_bindings_ignore_light_keys() {
        let mut input = input();
        input.press_key("o");
        let controller = MovementController::new(10.0, Vec3::ZERO);
        let mut spatial = Spatial::default();
        controller.update(1.0, &mut spatial, &input);
        assert_eq!(spatial.translation, Vec3::ZERO);
    }

    #[test]
    fn light_bindings_move_vertically() {
        let mut input = input();
        input.press_key("o");
        let controller = MovementController::light(10.0, Vec3::ZERO);
        let mut spatial = Spatial::default();
        controller.update(0.5, &mut spatial, &input);
        assert!(spatial.translation.abs_diff_eq(Vec3::new(0.0, 5.0, 0.0), 1e-6));
    }

    #[test]
    fn movement_reset_wins_same_frame() {
        let mut input = input();
        input.press_key("w");
        input.press_key("r");
        let start = Vec3::new(1.1, 0.75, 2.5);
        let controller = MovementController::light(10.0, start);
        let mut spatial = Spatial::default().with_translation(Vec3::new(4.0, 4.0, 4.0));
        controller.update(0.25, &mut spatial, &input);
        assert_eq!(spatial.translation, start);
    }

    #[test]
    fn yaw_turns_about_x_and_shift_flips_sign() {
        let mut input = input();
        let controller = RotationController::new(FRAC_PI_2, FRAC_PI_2, FRAC_PI_2, Quat::IDENTITY);

        input.press_key("x");
        let mut negative = Spatial::default();
        controller.update(1.0, &mut negative, &input);
        assert!(negative.rotation.abs_diff_eq(Quat::from_rotation_x(-FRAC_PI_2), 1e-6));

        input.press_key("Shift");
        let mut positive = Spatial::default();
        controller.update(1.0, &mut positive, &input);
        assert!(positive.rotation.abs_diff_eq(Quat::from_rotation_x(FRAC_PI_2), 1e-6));
    }

    #[test]
    fn pitch_and_roll_map_to_y_and_z() {
        let mut input = input();
        input.press_key("y");
        let controller = RotationController::new(1.0, 1.0, 1.0, Quat::IDENTITY);
        let mut spatial = Spatial::default();
        controller.update(0.5, &mut spatial, &input);
        assert!(spatial.rotation.abs_diff_eq(Quat::from_rotation_y(-0.5), 1e-6));

        input.release_key("y");
        input.press_key("z");
        let mut spatial = Spatial::default();
        controller.update(0.5, &mut spatial, &input);
        assert!(spatial.rotation.abs_diff_eq(Quat::from_rotation_z(-0.5), 1e-6));
    }

    #[test]
    fn rotation_reset_wins_same_frame() {
        let mut input = input();
        input.press_key("x");
        input.press_key("y");
        input.press_key("r");
        let initial = Quat::from_rotation_z(0.3);
        let controller = RotationController::new(1.0, 1.0, 1.0, initial);
        let mut spatial = Spatial::default();
        spatial.rotation = initial;
        controller.update(0.5, &mut spatial, &input);
        assert_eq!(spatial.rotation, initial);
    }
}
