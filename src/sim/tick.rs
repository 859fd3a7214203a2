//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically. Each tick runs
//! the same fixed sequence:
//!
//! 1. advance time (and age explosion effects)
//! 2. map the latched tilt onto the ship position
//! 3. consume latched spawn requests, then batched fire commands
//! 4. move everything along its trajectory
//! 5. purge finished or off-screen entities
//! 6. resolve torpedo x enemy hits
//! 7. apply score
//! 8. purge destroyed entities

use super::collision::{Hit, resolve};
use super::entity::EntityKind;
use super::events::{EffectsSink, GameEvent, SoundEffect, dispatch};
use super::input::AccelerationSample;
use super::spawner::spawn_enemy;
use super::state::{Explosion, GamePhase, GameState};

/// External input latched since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Most recent accelerometer sample, if one arrived
    pub acceleration: Option<AccelerationSample>,
    /// Fire commands (taps) to process this tick
    pub fire: u32,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, sink: &mut dyn EffectsSink) {
    if state.phase != GamePhase::Running {
        log::trace!("Tick ignored while {:?}", state.phase);
        return;
    }

    // 1. Time
    state.time_ticks += 1;
    state.elapsed += dt;
    age_explosions(state, dt, sink);

    // 2. Ship follows tilt
    if let Some(sample) = input.acceleration {
        state.input.on_acceleration_sample(sample);
    }
    update_player(state);

    // 3. Spawns and fire commands
    state.spawner.tick(dt);
    for _ in 0..state.spawner.take_pending() {
        spawn_one(state, sink);
    }
    for _ in 0..input.fire {
        state.fire(sink);
    }

    // 4. Trajectories
    for entity in state.registry.all_mut() {
        entity.advance(dt);
    }

    // 5. Expiry
    let playfield = state.playfield;
    for entity in state.registry.all_mut() {
        if entity.kind == EntityKind::Player {
            continue;
        }
        if entity.trajectory_complete() || !playfield.intersects(entity.pos, &entity.hitbox) {
            entity.alive = false;
        }
    }
    despawn_dead(state, sink);

    // 6. Collisions
    let hits = resolve(&mut state.registry);

    // 7. Score
    if !hits.is_empty() {
        for hit in &hits {
            on_hit(state, hit, sink);
        }
        dispatch(sink, GameEvent::UpdateScoreLabel(state.score.current()));
    }

    // 8. Destroyed
    despawn_dead(state, sink);
}

fn update_player(state: &mut GameState) {
    let x = state.input.player_x(state.playfield.width);
    state.player.pos.x = x;
    state.player.clamped_input = state.input.clamped();
    if let Some(entity) = state.registry.get_mut(state.player.id) {
        entity.prev_pos = entity.pos;
        entity.pos = state.player.pos;
    }
}

fn spawn_one(state: &mut GameState, sink: &mut dyn EffectsSink) {
    let spawn = spawn_enemy(&mut state.rng, &state.playfield, &state.tuning);
    state.register_enemy(spawn, sink);
}

fn on_hit(state: &mut GameState, hit: &Hit, sink: &mut dyn EffectsSink) {
    log::debug!(
        "Torpedo {} destroyed enemy {} at ({:.1}, {:.1})",
        hit.projectile,
        hit.enemy,
        hit.pos.x,
        hit.pos.y
    );

    let effect_id = state.next_effect_id();
    state.explosions.push(Explosion {
        effect_id,
        pos: hit.pos,
        remaining: state.tuning.explosion_lifetime,
    });
    dispatch(
        sink,
        GameEvent::DisplayExplosion {
            effect_id,
            pos: hit.pos,
        },
    );
    dispatch(sink, GameEvent::PlaySound(SoundEffect::Explosion));

    state.score.apply_delta(state.tuning.score_per_hit);
}

fn age_explosions(state: &mut GameState, dt: f32, sink: &mut dyn EffectsSink) {
    for explosion in &mut state.explosions {
        explosion.remaining -= dt;
    }
    state.explosions.retain(|explosion| {
        let expired = explosion.remaining <= 0.0;
        if expired {
            dispatch(
                &mut *sink,
                GameEvent::DiscardExplosion {
                    effect_id: explosion.effect_id,
                },
            );
        }
        !expired
    });
}

fn despawn_dead(state: &mut GameState, sink: &mut dyn EffectsSink) {
    for id in state.registry.purge_dead() {
        dispatch(sink, GameEvent::Despawn { id });
    }
}
