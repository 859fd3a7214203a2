//! Time-parameterized linear paths
//!
//! Enemies descend and torpedoes climb along straight lines over a fixed
//! duration. Position is a pure function of elapsed time, so advancing by many
//! small steps or one large step lands in the same place.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::lerp_clamped;

/// Slack for accumulated fixed-step rounding when testing completion
const COMPLETION_EPSILON: f32 = 1e-4;

/// A straight-line move from `from` to `to` over `duration`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub from: Vec2,
    pub to: Vec2,
    pub duration: f32,
    pub elapsed: f32,
}

impl Trajectory {
    pub fn new(from: Vec2, to: Vec2, duration: f32) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
        }
    }

    /// Position at the current elapsed time
    pub fn position(&self) -> Vec2 {
        if self.duration <= 0.0 {
            return self.to;
        }
        lerp_clamped(self.from, self.to, self.elapsed / self.duration)
    }

    /// Advance elapsed time and return the new position
    pub fn advance(&mut self, dt: f32) -> Vec2 {
        self.elapsed += dt;
        self.position()
    }

    /// True once the full duration has elapsed
    pub fn is_complete(&self) -> bool {
        self.elapsed + COMPLETION_EPSILON >= self.duration
    }
}
