//! Data-driven game balance
//!
//! Every gameplay constant can be overridden from a JSON file. Missing fields
//! fall back to the defaults in [`crate::consts`].

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Timing ===
    /// Seconds between enemy spawns
    pub spawn_interval: f32,
    /// Enemy descent duration
    pub enemy_descent_duration: f32,
    /// Torpedo flight duration
    pub projectile_duration: f32,
    /// Explosion effect lifetime
    pub explosion_lifetime: f32,

    // === Input ===
    /// Accelerometer x gain
    pub accel_gain: f32,
    /// Scaled tilt clamp
    pub tilt_clamp: f32,

    // === Scoring ===
    pub score_per_hit: u64,

    // === Geometry ===
    pub enemy_spawn_margin: f32,
    pub projectile_spawn_offset: f32,
    pub projectile_exit_margin: f32,
    pub player_baseline_offset: f32,
    /// Enemy sprite bounds (hitbox)
    pub enemy_width: f32,
    pub enemy_height: f32,
    /// Torpedo hitbox radius
    pub projectile_radius: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_interval: SPAWN_INTERVAL,
            enemy_descent_duration: ENEMY_DESCENT_DURATION,
            projectile_duration: PROJECTILE_DURATION,
            explosion_lifetime: EXPLOSION_LIFETIME,

            accel_gain: ACCEL_GAIN,
            tilt_clamp: TILT_CLAMP,

            score_per_hit: SCORE_PER_HIT,

            enemy_spawn_margin: ENEMY_SPAWN_MARGIN,
            projectile_spawn_offset: PROJECTILE_SPAWN_OFFSET,
            projectile_exit_margin: PROJECTILE_EXIT_MARGIN,
            player_baseline_offset: PLAYER_BASELINE_OFFSET,
            enemy_width: ENEMY_WIDTH,
            enemy_height: ENEMY_HEIGHT,
            projectile_radius: PROJECTILE_RADIUS,
        }
    }
}

/// Tuning could not be loaded
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(err) => write!(f, "failed to read tuning: {err}"),
            TuningError::Parse(err) => write!(f, "failed to parse tuning: {err}"),
            TuningError::Invalid(field) => write!(f, "invalid tuning value: {field}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(err) => Some(err),
            TuningError::Parse(err) => Some(err),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(err: std::io::Error) -> Self {
        TuningError::Io(err)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        TuningError::Parse(err)
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            (self.spawn_interval, "spawn_interval"),
            (self.enemy_descent_duration, "enemy_descent_duration"),
            (self.projectile_duration, "projectile_duration"),
            (self.tilt_clamp, "tilt_clamp"),
            (self.enemy_width, "enemy_width"),
            (self.enemy_height, "enemy_height"),
            (self.projectile_radius, "projectile_radius"),
        ];
        for (value, name) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(TuningError::Invalid(name));
            }
        }
        if self.explosion_lifetime.is_nan() || self.explosion_lifetime < 0.0 {
            return Err(TuningError::Invalid("explosion_lifetime"));
        }
        if !self.accel_gain.is_finite() {
            return Err(TuningError::Invalid("accel_gain"));
        }
        // Hits must move the score
        if self.score_per_hit == 0 {
            return Err(TuningError::Invalid("score_per_hit"));
        }
        Ok(())
    }
}
