//! Input-free motion: constant spin and sinusoidal bobbing.

use crate::spatial::Spatial;

/// Rotates its owner at a constant rate about each local axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spinner {
    /// Radians per second about local X, Y and Z.
    pub x_speed: f32,
    pub y_speed: f32,
    pub z_speed: f32,
}

impl Spinner {
    pub fn new(x_speed: f32, y_speed: f32, z_speed: f32) -> Self {
        Self { x_speed, y_speed, z_speed }
    }

    pub(crate) fn update(&self, delta: f32, spatial: &mut Spatial) {
        spatial.rotate_x(self.x_speed * delta);
        spatial.rotate_y(self.y_speed * delta);
        spatial.rotate_z(self.z_speed * delta);
    }
}

/// Oscillates its owner's x and y around a fixed point.
///
/// ```text
/// x = x_initial + amplitude · sin(time · x_speed)
/// y = y_initial + amplitude · sin(time · y_speed)
/// z   untouched
/// ```
///
/// `time` starts at `phase` and only ever accumulates deltas, so the
/// position is a pure function of total elapsed time: the same total
/// reached in one step or in a hundred lands in the same place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bobber {
    x_speed: f32,
    y_speed: f32,
    x_initial: f32,
    y_initial: f32,
    amplitude: f32,
    phase: f32,
    time: f32,
}

impl Bobber {
    pub fn new(x_speed: f32, y_speed: f32, x_initial: f32, y_initial: f32, amplitude: f32) -> Self {
        Self::with_phase(x_speed, y_speed, x_initial, y_initial, amplitude, 0.0)
    }

    /// Start the oscillation `phase` seconds in.
    pub fn with_phase(
        x_speed: f32,
        y_speed: f32,
        x_initial: f32,
        y_initial: f32,
        amplitude: f32,
        phase: f32,
    ) -> Self {
        Self {
            x_speed,
            y_speed,
            x_initial,
            y_initial,
            amplitude,
            phase,
            time: phase,
        }
    }

    /// Accumulated time, including the starting phase.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Rewind to the starting phase.
    pub fn restart(&mut self) {
        self.time = self.phase;
    }

    pub(crate) fn update(&mut self, delta: f32, spatial: &mut Spatial) {
        self.time += delta;
        spatial.translation.x = self.x_initial + self.amplitude * (self.time * self.x_speed).sin();
        spatial.translation.y = self.y_initial + self.amplitude * (self.time * self.y_speed).sin();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Quat, Vec3};
    use approx::assert_abs_diff_eq;

    #[test]
    fn spinner_integrates_rate() {
        let spinner = Spinner::new(0.0, 0.25, 0.0);
        let mut spatial = Spatial::default();
        spinner.update(2.0, &mut spatial);
        assert!(spatial.rotation.abs_diff_eq(Quat::from_rotation_y(0.5), 1e-6));
    }

    #[test]
    fn bobber_follows_sine() {
        let mut bobber = Bobber::new(0.0, 2.0, 0.0, -1.0, 0.125);
        let mut spatial = Spatial::from_xyz(5.0, 5.0, 7.0);
        bobber.update(0.5, &mut spatial);
        assert_abs_diff_eq!(spatial.translation.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(spatial.translation.y, -1.0 + 0.125 * 1.0_f32.sin(), epsilon = 1e-6);
        assert_eq!(spatial.translation.z, 7.0, "z must be left alone");
    }

    #[test]
    fn bobber_starts_at_phase() {
        let mut bobber = Bobber::with_phase(-10.0, 10.0, 3.0, 0.0, 0.125, 2.0);
        let mut spatial = Spatial::default();
        bobber.update(0.0, &mut spatial);
        assert_abs_diff_eq!(spatial.translation.x, 3.0 + 0.125 * (-20.0_f32).sin(), epsilon = 1e-6);
    }

    #[test]
    fn bobber_is_independent_of_step_size() {
        let mut coarse = Bobber::with_phase(-10.0, 10.0, 1.0, 2.0, 0.125, 3.0);
        let mut fine = coarse;
        let mut a = Spatial::default();
        let mut b = Spatial::default();

        coarse.update(1.0, &mut a);
        for _ in 0..64 {
            fine.update(1.0 / 64.0, &mut b);
        }
        assert!(a.translation.abs_diff_eq(b.translation, 1e-4));
    }

    #[test]
    fn bobber_restart_replays() {
        let mut bobber = Bobber::with_phase(1.0, 3.0, 0.0, 0.0, 1.0, 0.5);
        let mut first = Spatial::default();
        bobber.update(0.3, &mut first);
        bobber.update(0.3, &mut first);

        bobber.restart();
        assert_eq!(bobber.time(), 0.5);
        let mut second = Spatial::default();
        bobber.update(0.6, &mut second);
        assert!(first.translation.abs_diff_eq(second.translation, 1e-5));
        assert_eq!(second.translation.z, Vec3::ZERO.z);
    }
}
