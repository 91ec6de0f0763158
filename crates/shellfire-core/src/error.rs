//! Error types for engine setup and configuration.
//!
//! Player-driven inputs never produce errors: they are silently ignored when
//! not allowed (see [`Engine`](crate::engine::Engine)). Only host-side setup
//! (building the engine, laying out terrain, adding combatants) can fail.

use relief::TerrainError;

use crate::entity::PlayerId;
use crate::weapon::WeaponId;

/// Errors raised by host-side engine operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// A player with this id already exists.
    #[error("player {0} already exists")]
    DuplicatePlayer(PlayerId),

    /// Spawn parameters cannot describe a real combatant.
    #[error("invalid spawn for player {id}: {reason}")]
    InvalidSpawn {
        /// Player being added
        id: PlayerId,
        /// What was wrong
        reason: &'static str,
    },

    /// Terrain could not be generated.
    #[error("terrain error: {0}")]
    Terrain(#[from] TerrainError),

    /// A weapon name did not match any catalog entry.
    #[error("unknown weapon: {0}")]
    UnknownWeapon(String),

    /// The engine configuration is unusable.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// A deserialized player record breaks an entity invariant.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SnapshotError {
    /// Aim angle outside `0..=180`.
    #[error("{id} angle {value} is outside 0..=180")]
    AngleOutOfRange {
        /// Player in the record
        id: PlayerId,
        /// Stored angle
        value: f32,
    },

    /// Launch power outside `10..=100`.
    #[error("{id} power {value} is outside 10..=100")]
    PowerOutOfRange {
        /// Player in the record
        id: PlayerId,
        /// Stored power
        value: f32,
    },

    /// The selected weapon is not in the unlocked set.
    #[error("{id} has {weapon} selected but not unlocked")]
    WeaponLocked {
        /// Player in the record
        id: PlayerId,
        /// Selected weapon
        weapon: WeaponId,
    },

    /// Position or velocity is NaN or infinite.
    #[error("{id} has a non-finite position or velocity")]
    NonFinite {
        /// Player in the record
        id: PlayerId,
    },
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A numeric constant is out of its valid range.
    #[error("{field} is out of range: {value}")]
    OutOfRange {
        /// Dotted path of the offending field
        field: &'static str,
        /// Value supplied
        value: f32,
    },

    /// Explosions must last at least one frame.
    #[error("explosion_frames must be at least 1")]
    ZeroExplosionFrames,

    /// Terrain section is invalid.
    #[error("terrain: {0}")]
    Terrain(#[from] TerrainError),

    /// JSON could not be parsed.
    #[error("failed to parse config: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        Self::Parse(error.to_string())
    }
}
