//! Entity types and collision tags

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::trajectory::Trajectory;

/// Unique entity identifier (monotonic within a session)
pub type EntityId = u32;

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy,
    Projectile,
}

/// Collision shape, centered on the entity position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Hitbox {
    /// Torpedoes use a circle
    Circle { radius: f32 },
    /// Enemies use their sprite bounds
    Rect { half_extents: Vec2 },
}

impl Hitbox {
    pub fn rect(width: f32, height: f32) -> Self {
        Hitbox::Rect {
            half_extents: Vec2::new(width / 2.0, height / 2.0),
        }
    }

    /// Half-size of the bounding box
    pub fn half_extents(&self) -> Vec2 {
        match *self {
            Hitbox::Circle { radius } => Vec2::splat(radius),
            Hitbox::Rect { half_extents } => half_extents,
        }
    }
}

/// Category/contact bitmask pair
///
/// Two entities may collide only if each one's `contact_mask` includes the
/// other's `category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionTag {
    pub category: u32,
    pub contact_mask: u32,
}

impl CollisionTag {
    pub const PROJECTILE_CATEGORY: u32 = 0x01 << 0;
    pub const ENEMY_CATEGORY: u32 = 0x01 << 1;

    /// Takes no part in collision detection
    pub const NONE: Self = Self {
        category: 0,
        contact_mask: 0,
    };
    pub const PROJECTILE: Self = Self {
        category: Self::PROJECTILE_CATEGORY,
        contact_mask: Self::ENEMY_CATEGORY,
    };
    pub const ENEMY: Self = Self {
        category: Self::ENEMY_CATEGORY,
        contact_mask: Self::PROJECTILE_CATEGORY,
    };

    /// Default tag for an entity kind
    pub fn for_kind(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Player => Self::NONE,
            EntityKind::Enemy => Self::ENEMY,
            EntityKind::Projectile => Self::PROJECTILE,
        }
    }

    /// Mutual contact test
    #[inline]
    pub fn interacts_with(&self, other: &CollisionTag) -> bool {
        (self.contact_mask & other.category) != 0 && (other.contact_mask & self.category) != 0
    }
}

/// A live simulation object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec2,
    /// Position at the start of the last step (collision sweeps from here)
    pub prev_pos: Vec2,
    pub hitbox: Hitbox,
    pub tag: CollisionTag,
    /// `None` for entities that never expire (the player)
    pub trajectory: Option<Trajectory>,
    /// Dead entities are skipped by collision and purged before the next tick
    pub alive: bool,
}

impl Entity {
    pub fn new(kind: EntityKind, pos: Vec2, hitbox: Hitbox) -> Self {
        Self {
            id: 0,
            kind,
            pos,
            prev_pos: pos,
            hitbox,
            tag: CollisionTag::for_kind(kind),
            trajectory: None,
            alive: true,
        }
    }

    pub fn with_trajectory(mut self, trajectory: Trajectory) -> Self {
        self.pos = trajectory.position();
        self.prev_pos = self.pos;
        self.trajectory = Some(trajectory);
        self
    }

    /// Move along the trajectory (if any)
    pub fn advance(&mut self, dt: f32) {
        self.prev_pos = self.pos;
        if let Some(trajectory) = &mut self.trajectory {
            self.pos = trajectory.advance(dt);
        }
    }

    /// True once the trajectory has run its full duration
    pub fn trajectory_complete(&self) -> bool {
        self.trajectory.is_some_and(|t| t.is_complete())
    }
}
