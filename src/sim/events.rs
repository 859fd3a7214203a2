//! Output events for the presentation layer
//!
//! The simulation never touches sprites, emitters or audio directly. It emits
//! fire-and-forget [`GameEvent`]s to an [`EffectsSink`]; a sink that cannot
//! honor an event (missing asset, etc.) reports an [`EffectError`], which the
//! driver logs and skips.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{EntityId, Hitbox};

/// Identifier for a transient visual effect (explosions)
pub type EffectId = u32;

/// Enemy sprite variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Appearance {
    Alien,
    Alien2,
    Alien3,
}

impl Appearance {
    pub const ALL: [Appearance; 3] = [Appearance::Alien, Appearance::Alien2, Appearance::Alien3];

    /// Image asset key
    pub fn asset_key(&self) -> &'static str {
        match self {
            Appearance::Alien => "alien",
            Appearance::Alien2 => "alien2",
            Appearance::Alien3 => "alien3",
        }
    }
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Torpedo fired
    Torpedo,
    /// Enemy destroyed
    Explosion,
}

impl SoundEffect {
    /// Audio asset name
    pub fn asset_name(&self) -> &'static str {
        match self {
            SoundEffect::Torpedo => "torpedo.mp3",
            SoundEffect::Explosion => "explosion.mp3",
        }
    }
}

/// Something the presentation layer should show or play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    DisplayEnemy {
        id: EntityId,
        appearance: Appearance,
        pos: Vec2,
        hitbox: Hitbox,
    },
    DisplayProjectile {
        id: EntityId,
        pos: Vec2,
    },
    PlaySound(SoundEffect),
    DisplayExplosion {
        effect_id: EffectId,
        pos: Vec2,
    },
    DiscardExplosion {
        effect_id: EffectId,
    },
    /// Entity left the simulation; drop its sprite
    Despawn {
        id: EntityId,
    },
    UpdateScoreLabel(u64),
}

/// Why a sink could not honor an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectError {
    /// Asset could not be found or loaded
    MissingAsset(String),
    /// Sink refused the event for any other reason
    Rejected(String),
}

impl fmt::Display for EffectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectError::MissingAsset(name) => write!(f, "missing asset: {name}"),
            EffectError::Rejected(reason) => write!(f, "effect rejected: {reason}"),
        }
    }
}

impl std::error::Error for EffectError {}

/// Receiver for simulation output
pub trait EffectsSink {
    fn emit(&mut self, event: &GameEvent) -> Result<(), EffectError>;
}

/// Collects events in order; handy for tests and replays
impl EffectsSink for Vec<GameEvent> {
    fn emit(&mut self, event: &GameEvent) -> Result<(), EffectError> {
        self.push(event.clone());
        Ok(())
    }
}

/// Send an event, logging (and otherwise ignoring) sink failures
pub(crate) fn dispatch(sink: &mut dyn EffectsSink, event: GameEvent) {
    if let Err(err) = sink.emit(&event) {
        log::warn!("Skipping {:?}: {}", event, err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoExplosions(Vec<GameEvent>);

    impl EffectsSink for NoExplosions {
        fn emit(&mut self, event: &GameEvent) -> Result<(), EffectError> {
            if matches!(event, GameEvent::DisplayExplosion { .. }) {
                return Err(EffectError::MissingAsset("Explosion".into()));
            }
            self.0.push(event.clone());
            Ok(())
        }
    }

    #[test]
    fn test_dispatch_skips_failed_event() {
        let mut sink = NoExplosions(Vec::new());
        dispatch(
            &mut sink,
            GameEvent::DisplayExplosion {
                effect_id: 1,
                pos: Vec2::ZERO,
            },
        );
        dispatch(&mut sink, GameEvent::UpdateScoreLabel(5));
        assert_eq!(sink.0, vec![GameEvent::UpdateScoreLabel(5)]);
    }

    #[test]
    fn test_asset_names() {
        assert_eq!(SoundEffect::Torpedo.asset_name(), "torpedo.mp3");
        let keys: Vec<_> = Appearance::ALL.iter().map(|a| a.asset_key()).collect();
        assert_eq!(keys, ["alien", "alien2", "alien3"]);
    }
}
