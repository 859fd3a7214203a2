//! Enemy spawning
//!
//! The spawn timer only accumulates time and latches pending spawn requests;
//! the driver consumes them during its tick so the registry is never touched
//! from outside the tick.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::entity::{Entity, EntityKind, Hitbox};
use super::events::Appearance;
use super::state::Playfield;
use super::trajectory::Trajectory;
use crate::tuning::Tuning;

/// Fixed-interval spawn timer
#[derive(Debug, Clone)]
pub struct Spawner {
    interval: f32,
    accumulator: f32,
    pending: u32,
}

impl Spawner {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            accumulator: 0.0,
            pending: 0,
        }
    }

    /// Accumulate time, latching one request per elapsed interval
    ///
    /// Non-finite or negative steps are ignored.
    pub fn tick(&mut self, dt: f32) {
        if self.interval <= 0.0 || !dt.is_finite() || dt < 0.0 {
            return;
        }
        self.accumulator += dt;
        if self.accumulator >= self.interval {
            let elapsed = (self.accumulator / self.interval).floor();
            // `as` saturates; overflowed remainders clamp to zero
            self.pending = self.pending.saturating_add(elapsed as u32);
            self.accumulator = (self.accumulator - elapsed * self.interval).max(0.0);
        }
    }

    /// Latched requests not yet consumed
    pub fn pending(&self) -> u32 {
        self.pending
    }

    /// Consume all latched requests
    pub fn take_pending(&mut self) -> u32 {
        std::mem::take(&mut self.pending)
    }
}

/// A freshly built enemy, not yet registered
#[derive(Debug, Clone)]
pub struct EnemySpawn {
    pub entity: Entity,
    pub appearance: Appearance,
}

/// Build one enemy at a random x along the top edge
///
/// Appearance and position are drawn independently.
pub fn spawn_enemy<R: Rng>(rng: &mut R, playfield: &Playfield, tuning: &Tuning) -> EnemySpawn {
    let appearance = *Appearance::ALL.choose(rng).unwrap_or(&Appearance::Alien);

    let low = -playfield.width / 2.0 + tuning.enemy_spawn_margin;
    let high = playfield.width / 2.0 - tuning.enemy_spawn_margin;
    let x = if low <= high {
        rng.random_range(low..=high)
    } else {
        log::warn!(
            "Playfield width {} too narrow for spawn margin {}, spawning at center",
            playfield.width,
            tuning.enemy_spawn_margin
        );
        0.0
    };

    enemy_at(x, appearance, playfield, tuning)
}

/// Build an enemy at a fixed x along the top edge
pub fn enemy_at(
    x: f32,
    appearance: Appearance,
    playfield: &Playfield,
    tuning: &Tuning,
) -> EnemySpawn {
    let from = Vec2::new(x, playfield.top());
    let to = Vec2::new(x, playfield.bottom() - tuning.enemy_height);
    let trajectory = Trajectory::new(from, to, tuning.enemy_descent_duration);

    let entity = Entity::new(
        EntityKind::Enemy,
        from,
        Hitbox::rect(tuning.enemy_width, tuning.enemy_height),
    )
    .with_trajectory(trajectory);

    EnemySpawn { entity, appearance }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawns_on_interval() {
        let mut spawner = Spawner::new(0.75);
        spawner.tick(0.5);
        assert_eq!(spawner.pending(), 0);
        spawner.tick(0.25);
        assert_eq!(spawner.take_pending(), 1);
        assert_eq!(spawner.pending(), 0);
    }

    #[test]
    fn test_large_step_latches_multiple() {
        let mut spawner = Spawner::new(0.75);
        spawner.tick(2.0);
        assert_eq!(spawner.take_pending(), 2);
        spawner.tick(0.25);
        assert_eq!(spawner.take_pending(), 1);
    }

    #[test]
    fn test_non_finite_step_is_ignored() {
        let mut spawner = Spawner::new(0.75);
        spawner.tick(f32::INFINITY);
        spawner.tick(f32::NAN);
        spawner.tick(-1.0);
        assert_eq!(spawner.pending(), 0);

        spawner.tick(0.75);
        assert_eq!(spawner.take_pending(), 1);
    }

    #[test]
    fn test_huge_step_terminates() {
        let mut spawner = Spawner::new(0.75);
        spawner.tick(f32::MAX);
        assert!(spawner.take_pending() > 0);
        spawner.tick(0.1);
        assert_eq!(spawner.pending(), 0);
    }

    #[test]
    fn test_spawn_within_margins() {
        let playfield = Playfield::new(200.0, 400.0);
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let spawn = spawn_enemy(&mut rng, &playfield, &tuning);
            assert!(spawn.entity.pos.x >= -84.0 && spawn.entity.pos.x <= 84.0);
            assert_eq!(spawn.entity.pos.y, 200.0);
            assert_eq!(spawn.entity.kind, EntityKind::Enemy);
        }
    }

    #[test]
    fn test_descends_below_bottom_edge() {
        let playfield = Playfield::new(300.0, 600.0);
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut spawn = spawn_enemy(&mut rng, &playfield, &tuning);
        spawn.entity.advance(tuning.enemy_descent_duration);
        assert!(spawn.entity.pos.y < playfield.bottom());
        assert!(spawn.entity.trajectory_complete());
    }

    #[test]
    fn test_narrow_playfield_spawns_at_center() {
        let playfield = Playfield::new(20.0, 400.0);
        let mut rng = Pcg32::seed_from_u64(3);
        let spawn = spawn_enemy(&mut rng, &playfield, &Tuning::default());
        assert_eq!(spawn.entity.pos.x, 0.0);
    }

    #[test]
    fn test_all_appearances_used() {
        let playfield = Playfield::new(300.0, 600.0);
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            seen.insert(spawn_enemy(&mut rng, &playfield, &tuning).appearance);
        }
        assert_eq!(seen.len(), 3);
    }
}
