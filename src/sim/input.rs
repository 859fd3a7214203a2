//! Tilt input
//!
//! The accelerometer streams samples at roughly 10 Hz. Only the x axis is
//! used: it is scaled by a fixed gain and latched here, and each tick maps the
//! latched value straight onto the ship's x position. There is no smoothing
//! and no velocity integration.

use serde::{Deserialize, Serialize};

/// One accelerometer reading
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AccelerationSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl AccelerationSample {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Latches the most recent scaled tilt value
#[derive(Debug, Clone)]
pub struct InputController {
    gain: f32,
    clamp: f32,
    /// Scaled, unclamped tilt. Zero until the first sample arrives.
    raw: f32,
}

impl InputController {
    pub fn new(gain: f32, clamp: f32) -> Self {
        Self {
            gain,
            clamp,
            raw: 0.0,
        }
    }

    /// Latch a new sample (only `x` is consumed)
    pub fn on_acceleration_sample(&mut self, sample: AccelerationSample) {
        self.raw = sample.x * self.gain;
        log::trace!("acceleration x: {}", self.raw);
    }

    pub fn raw(&self) -> f32 {
        self.raw
    }

    /// Latched tilt after clamping
    pub fn clamped(&self) -> f32 {
        self.raw.clamp(-self.clamp, self.clamp)
    }

    /// Ship x for the latched value
    pub fn player_x(&self, playfield_width: f32) -> f32 {
        position_for_tilt(self.raw, self.clamp, playfield_width)
    }
}

/// Map a scaled tilt value onto a ship x position using the default clamp
///
/// `raw` is clamped to [-30, 30] and scaled so the clamped range spans half
/// the playfield width either side of center.
pub fn compute_player_position_x(raw: f32, playfield_width: f32) -> f32 {
    position_for_tilt(raw, crate::consts::TILT_CLAMP, playfield_width)
}

fn position_for_tilt(raw: f32, clamp: f32, playfield_width: f32) -> f32 {
    if clamp <= 0.0 || raw.is_nan() {
        return 0.0;
    }
    let clamped = raw.clamp(-clamp, clamp);
    (clamped / clamp) * (playfield_width / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_center() {
        let input = InputController::new(50.0, 30.0);
        assert_eq!(input.player_x(750.0), 0.0);
    }

    #[test]
    fn test_clamps_to_edges() {
        assert_eq!(compute_player_position_x(1000.0, 750.0), 375.0);
        assert_eq!(compute_player_position_x(-1000.0, 750.0), -375.0);
    }

    #[test]
    fn test_linear_inside_clamp() {
        assert!((compute_player_position_x(15.0, 600.0) - 150.0).abs() < 0.001);
    }

    #[test]
    fn test_sample_is_scaled_by_gain() {
        let mut input = InputController::new(50.0, 30.0);
        input.on_acceleration_sample(AccelerationSample::new(0.2, -1.0, 0.3));
        assert!((input.raw() - 10.0).abs() < 0.001);
        input.on_acceleration_sample(AccelerationSample::new(1.0, 0.0, 0.0));
        assert_eq!(input.clamped(), 30.0);
        assert_eq!(input.player_x(400.0), 200.0);
    }

    #[test]
    fn test_nan_sample_centers() {
        assert_eq!(compute_player_position_x(f32::NAN, 400.0), 0.0);
    }
}
