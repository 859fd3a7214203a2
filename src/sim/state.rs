//! Game state and core simulation types
//!
//! The playfield is centered on the origin with y pointing up. Everything the
//! tick mutates lives in [`GameState`]; nothing outside the tick (or an
//! explicit fire command) touches the registry or score.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind, Hitbox};
use super::events::{self, Appearance, EffectId, EffectsSink, GameEvent, SoundEffect};
use super::input::InputController;
use super::projectile::fire_projectile;
use super::registry::EntityRegistry;
use super::score::ScoreTracker;
use super::spawner::{EnemySpawn, Spawner, enemy_at};
use crate::tuning::Tuning;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Created, waiting for `start`
    Idle,
    /// Active gameplay (until the process exits)
    Running,
}

/// Playfield geometry, supplied by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.height / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        -self.height / 2.0
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True while any part of the hitbox is still on screen
    pub fn intersects(&self, pos: Vec2, hitbox: &Hitbox) -> bool {
        crate::sim::collision::rect_rect_overlap(
            Vec2::ZERO,
            self.half_extents(),
            pos,
            hitbox.half_extents(),
        )
    }
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct PlayerState {
    /// Registry id (kind Player, never collides)
    pub id: EntityId,
    pub pos: Vec2,
    /// Tilt after clamping, in [-clamp, clamp]
    pub clamped_input: f32,
}

/// A live explosion effect awaiting discard
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Explosion {
    pub effect_id: EffectId,
    pub pos: Vec2,
    pub remaining: f32,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub playfield: Playfield,
    pub tuning: Tuning,
    /// Simulation time since start
    pub elapsed: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: PlayerState,
    pub input: InputController,
    pub spawner: Spawner,
    pub(crate) registry: EntityRegistry,
    pub(crate) score: ScoreTracker,
    pub(crate) explosions: Vec<Explosion>,
    pub(crate) rng: Pcg32,
    next_effect_id: EffectId,
}

impl GameState {
    /// Create an idle session for the given playfield
    pub fn new(playfield: Playfield, tuning: Tuning, seed: u64) -> Self {
        let mut registry = EntityRegistry::new();
        let pos = Vec2::new(0.0, playfield.bottom() + tuning.player_baseline_offset);
        let id = registry.add(Entity::new(
            EntityKind::Player,
            pos,
            Hitbox::rect(tuning.enemy_width, tuning.enemy_height),
        ));

        Self {
            seed,
            phase: GamePhase::Idle,
            playfield,
            input: InputController::new(tuning.accel_gain, tuning.tilt_clamp),
            spawner: Spawner::new(tuning.spawn_interval),
            tuning,
            elapsed: 0.0,
            time_ticks: 0,
            player: PlayerState {
                id,
                pos,
                clamped_input: 0.0,
            },
            registry,
            score: ScoreTracker::new(),
            explosions: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_effect_id: 1,
        }
    }

    /// Idle -> Running; shows the initial score
    pub fn start(&mut self, sink: &mut dyn EffectsSink) {
        if self.phase == GamePhase::Running {
            return;
        }
        self.phase = GamePhase::Running;
        log::info!(
            "Session started: {}x{} playfield, seed {}",
            self.playfield.width,
            self.playfield.height,
            self.seed
        );
        events::dispatch(sink, GameEvent::UpdateScoreLabel(self.score.current()));
    }

    /// Fire a torpedo from the ship right now
    ///
    /// Returns the new torpedo's id, or `None` when the session isn't running.
    pub fn fire(&mut self, sink: &mut dyn EffectsSink) -> Option<EntityId> {
        if self.phase != GamePhase::Running {
            log::debug!("Ignoring fire while {:?}", self.phase);
            return None;
        }
        events::dispatch(sink, GameEvent::PlaySound(SoundEffect::Torpedo));

        let torpedo = fire_projectile(self.player.pos, &self.playfield, &self.tuning);
        let pos = torpedo.pos;
        let id = self.registry.add(torpedo);
        log::debug!("Torpedo {} fired at ({:.1}, {:.1})", id, pos.x, pos.y);
        events::dispatch(sink, GameEvent::DisplayProjectile { id, pos });
        Some(id)
    }

    /// Drop an enemy in at a chosen x, bypassing the spawn timer
    pub fn spawn_enemy_at(
        &mut self,
        x: f32,
        appearance: Appearance,
        sink: &mut dyn EffectsSink,
    ) -> EntityId {
        let spawn = enemy_at(x, appearance, &self.playfield, &self.tuning);
        self.register_enemy(spawn, sink)
    }

    pub(crate) fn register_enemy(
        &mut self,
        spawn: EnemySpawn,
        sink: &mut dyn EffectsSink,
    ) -> EntityId {
        let pos = spawn.entity.pos;
        let hitbox = spawn.entity.hitbox;
        let id = self.registry.add(spawn.entity);
        log::debug!(
            "Enemy {} ({}) spawned at x={:.1}",
            id,
            spawn.appearance.asset_key(),
            pos.x
        );
        events::dispatch(
            sink,
            GameEvent::DisplayEnemy {
                id,
                appearance: spawn.appearance,
                pos,
                hitbox,
            },
        );
        id
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn score(&self) -> u64 {
        self.score.current()
    }

    /// Explosions still on screen
    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    /// Live enemies, in id order
    pub fn enemies(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.registry.iter(EntityKind::Enemy)
    }

    /// Live torpedoes, in id order
    pub fn projectiles(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.registry.iter(EntityKind::Projectile)
    }

    pub(crate) fn next_effect_id(&mut self) -> EffectId {
        let id = self.next_effect_id;
        self.next_effect_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle() {
        let state = GameState::new(Playfield::new(750.0, 1334.0), Tuning::default(), 1);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score(), 0);
        assert_eq!(state.player.pos, Vec2::new(0.0, -567.0));
        assert_eq!(state.registry().count(EntityKind::Player), 1);
    }

    #[test]
    fn test_start_shows_score() {
        let mut state = GameState::new(Playfield::new(750.0, 1334.0), Tuning::default(), 1);
        let mut events = Vec::new();
        state.start(&mut events);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(events, vec![GameEvent::UpdateScoreLabel(0)]);

        // Starting twice does nothing
        state.start(&mut events);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_fire_ignored_while_idle() {
        let mut state = GameState::new(Playfield::new(750.0, 1334.0), Tuning::default(), 1);
        let mut events = Vec::new();
        assert!(state.fire(&mut events).is_none());
        assert!(events.is_empty());
    }

    #[test]
    fn test_fire_has_no_cooldown() {
        let mut state = GameState::new(Playfield::new(750.0, 1334.0), Tuning::default(), 1);
        let mut events = Vec::new();
        state.start(&mut events);
        for _ in 0..5 {
            assert!(state.fire(&mut events).is_some());
        }
        assert_eq!(state.projectiles().count(), 5);
        let sounds = events
            .iter()
            .filter(|e| matches!(e, GameEvent::PlaySound(SoundEffect::Torpedo)))
            .count();
        assert_eq!(sounds, 5);
    }

    #[test]
    fn test_playfield_intersects() {
        let playfield = Playfield::new(100.0, 200.0);
        let hitbox = Hitbox::rect(20.0, 20.0);
        assert!(playfield.intersects(Vec2::new(0.0, 105.0), &hitbox));
        assert!(!playfield.intersects(Vec2::new(0.0, 111.0), &hitbox));
        assert!(!playfield.intersects(Vec2::new(-61.0, 0.0), &hitbox));
    }
}
