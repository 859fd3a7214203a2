//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies; presentation is reached only
//!   through [`EffectsSink`]

pub mod collision;
pub mod entity;
pub mod events;
pub mod input;
pub mod projectile;
pub mod registry;
pub mod score;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod trajectory;

pub use collision::{Hit, circle_rect_overlap, rect_rect_overlap, resolve};
pub use entity::{CollisionTag, Entity, EntityId, EntityKind, Hitbox};
pub use events::{Appearance, EffectError, EffectId, EffectsSink, GameEvent, SoundEffect};
pub use input::{AccelerationSample, InputController, compute_player_position_x};
pub use projectile::fire_projectile;
pub use registry::EntityRegistry;
pub use score::ScoreTracker;
pub use spawner::{EnemySpawn, Spawner, enemy_at, spawn_enemy};
pub use state::{Explosion, GamePhase, GameState, Playfield, PlayerState};
pub use tick::{TickInput, tick};
pub use trajectory::Trajectory;
