//! Shoot UFO - A tilt-controlled single-screen arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, trajectories, collisions, score)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Seconds between enemy spawns
    pub const SPAWN_INTERVAL: f32 = 0.75;
    /// Time for an enemy to descend from the top edge to below the bottom edge
    pub const ENEMY_DESCENT_DURATION: f32 = 6.0;
    /// Time for a torpedo to climb from the ship to above the top edge
    pub const PROJECTILE_DURATION: f32 = 1.0;

    /// Raw accelerometer x is multiplied by this before clamping
    pub const ACCEL_GAIN: f32 = 50.0;
    /// Scaled tilt is clamped to [-TILT_CLAMP, TILT_CLAMP]
    pub const TILT_CLAMP: f32 = 30.0;

    /// Points per destroyed enemy
    pub const SCORE_PER_HIT: u64 = 5;

    /// Keeps spawned enemies this far from the side edges
    pub const ENEMY_SPAWN_MARGIN: f32 = 16.0;
    /// Torpedoes start this far above the ship
    pub const PROJECTILE_SPAWN_OFFSET: f32 = 5.0;
    /// Torpedoes finish this far above the top edge
    pub const PROJECTILE_EXIT_MARGIN: f32 = 10.0;
    /// Explosion effects are discarded after this long
    pub const EXPLOSION_LIFETIME: f32 = 1.5;
    /// Ship sits this far above the bottom edge
    pub const PLAYER_BASELINE_OFFSET: f32 = 100.0;

    /// Default enemy hitbox (sprite bounds)
    pub const ENEMY_WIDTH: f32 = 32.0;
    pub const ENEMY_HEIGHT: f32 = 32.0;
    /// Default torpedo hitbox radius
    pub const PROJECTILE_RADIUS: f32 = 8.0;
}

/// Clamp a point into an axis-aligned rectangle
#[inline]
pub fn clamp_to_rect(p: Vec2, center: Vec2, half_extents: Vec2) -> Vec2 {
    p.clamp(center - half_extents, center + half_extents)
}

/// Linear interpolation between two points, `t` clamped to [0, 1]
#[inline]
pub fn lerp_clamped(from: Vec2, to: Vec2, t: f32) -> Vec2 {
    from.lerp(to, t.clamp(0.0, 1.0))
}
