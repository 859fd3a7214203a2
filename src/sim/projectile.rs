//! Torpedoes
//!
//! A torpedo leaves just above the ship and climbs straight up, finishing a
//! little above the top edge. There is no fire cooldown.

use glam::Vec2;

use super::entity::{Entity, EntityKind, Hitbox};
use super::state::Playfield;
use super::trajectory::Trajectory;
use crate::tuning::Tuning;

/// Build a torpedo fired from `player_pos`, not yet registered
pub fn fire_projectile(player_pos: Vec2, playfield: &Playfield, tuning: &Tuning) -> Entity {
    let from = player_pos + Vec2::new(0.0, tuning.projectile_spawn_offset);
    let to = Vec2::new(player_pos.x, playfield.top() + tuning.projectile_exit_margin);
    let trajectory = Trajectory::new(from, to, tuning.projectile_duration);

    Entity::new(
        EntityKind::Projectile,
        from,
        Hitbox::Circle {
            radius: tuning.projectile_radius,
        },
    )
    .with_trajectory(trajectory)
}
