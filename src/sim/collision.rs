//! Collision detection between torpedoes and enemies
//!
//! Torpedoes carry circle hitboxes and enemies carry rectangles sized to their
//! sprites. Only pairs whose collision tags accept each other are tested, so
//! the player (empty tag) never takes part.
//!
//! Tests are swept over the last step: the relative motion of one entity in
//! the other's frame is a segment, checked against the Minkowski sum of the
//! two shapes. A fast torpedo cannot skip through an enemy between ticks.

use glam::Vec2;

use super::entity::{Entity, EntityId, EntityKind, Hitbox};
use super::registry::EntityRegistry;
use crate::clamp_to_rect;

/// A torpedo that struck an enemy this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub projectile: EntityId,
    pub enemy: EntityId,
    /// Enemy position at impact (explosion goes here)
    pub pos: Vec2,
}

/// Axis-aligned rectangle overlap (touching edges count)
#[inline]
pub fn rect_rect_overlap(a_center: Vec2, a_half: Vec2, b_center: Vec2, b_half: Vec2) -> bool {
    let delta = (a_center - b_center).abs();
    delta.x <= a_half.x + b_half.x && delta.y <= a_half.y + b_half.y
}

/// Circle against axis-aligned rectangle
#[inline]
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect_center: Vec2, rect_half: Vec2) -> bool {
    let closest = clamp_to_rect(center, rect_center, rect_half);
    center.distance_squared(closest) <= radius * radius
}

/// Segment `p0 -> p1` against an origin-centered box (slab test)
pub fn segment_box_overlap(p0: Vec2, p1: Vec2, half: Vec2) -> bool {
    let d = p1 - p0;
    let mut t_min = 0.0f32;
    let mut t_max = 1.0f32;

    for axis in 0..2 {
        let (p, dir, h) = (p0[axis], d[axis], half[axis]);
        if dir.abs() <= f32::EPSILON {
            if p.abs() > h {
                return false;
            }
            continue;
        }
        let inv = 1.0 / dir;
        let (mut t0, mut t1) = ((-h - p) * inv, (h - p) * inv);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return false;
        }
    }
    true
}

/// Segment `p0 -> p1` against a circle
pub fn segment_circle_overlap(p0: Vec2, p1: Vec2, center: Vec2, radius: f32) -> bool {
    let d = p1 - p0;
    let len_sq = d.length_squared();
    let t = if len_sq > 0.0 {
        ((center - p0).dot(d) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (p0 + d * t).distance_squared(center) <= radius * radius
}

/// Segment against an origin-centered box grown by `radius` with rounded corners
fn segment_rounded_box_overlap(p0: Vec2, p1: Vec2, half: Vec2, radius: f32) -> bool {
    if segment_box_overlap(p0, p1, half + Vec2::new(radius, 0.0))
        || segment_box_overlap(p0, p1, half + Vec2::new(0.0, radius))
    {
        return true;
    }
    [
        Vec2::new(half.x, half.y),
        Vec2::new(-half.x, half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(-half.x, -half.y),
    ]
    .into_iter()
    .any(|corner| segment_circle_overlap(p0, p1, corner, radius))
}

/// Shape-aware overlap between two entities at any point during the last step
///
/// With no motion (`prev_pos == pos`) this is the plain overlap test.
pub fn hitboxes_overlap(a: &Entity, b: &Entity) -> bool {
    // a's path relative to b
    let r0 = a.prev_pos - b.prev_pos;
    let r1 = a.pos - b.pos;

    match (a.hitbox, b.hitbox) {
        (Hitbox::Circle { radius: ra }, Hitbox::Circle { radius: rb }) => {
            segment_circle_overlap(r0, r1, Vec2::ZERO, ra + rb)
        }
        (Hitbox::Circle { radius }, Hitbox::Rect { half_extents })
        | (Hitbox::Rect { half_extents }, Hitbox::Circle { radius }) => {
            segment_rounded_box_overlap(r0, r1, half_extents, radius)
        }
        (Hitbox::Rect { half_extents: ha }, Hitbox::Rect { half_extents: hb }) => {
            segment_box_overlap(r0, r1, ha + hb)
        }
    }
}

/// Whether two live entities generate a contact
pub fn can_collide(a: &Entity, b: &Entity) -> bool {
    a.alive && b.alive && a.tag.interacts_with(&b.tag) && hitboxes_overlap(a, b)
}

/// Scan live torpedo x enemy pairs, killing both sides of every hit
///
/// Each torpedo resolves against the first overlapping enemy in id order and
/// each enemy can be claimed once, so nothing scores twice in one pass. Dead
/// entities are left in the registry for the driver to purge.
pub fn resolve(registry: &mut EntityRegistry) -> Vec<Hit> {
    let mut hits = Vec::new();
    let mut claimed: Vec<EntityId> = Vec::new();

    for projectile in registry.iter(EntityKind::Projectile).filter(|p| p.alive) {
        let target = registry
            .iter(EntityKind::Enemy)
            .filter(|e| !claimed.contains(&e.id))
            .find(|e| can_collide(projectile, e));

        if let Some(enemy) = target {
            claimed.push(enemy.id);
            hits.push(Hit {
                projectile: projectile.id,
                enemy: enemy.id,
                pos: enemy.pos,
            });
        }
    }

    for hit in &hits {
        registry.kill(hit.projectile);
        registry.kill(hit.enemy);
    }

    hits
}
