//! Entity types for the artillery duel.
//!
//! - [`PlayerId`]: Unique identifier for a combatant
//! - [`Player`]: A combatant and its aim, loadout, and kinematic state
//! - [`Projectile`]: The single shell in flight
//!
//! Players are never removed mid-match; defeat is modeled by health reaching
//! zero. At most one projectile exists at a time.
//!
//! # Example
//!
//! ```
//! use shellfire_core::entity::{Hitbox, Player, PlayerId, PlayerSpawn};
//! use glam::Vec2;
//!
//! let spawn = PlayerSpawn::new(Vec2::new(80.0, 400.0), 45.0, 50.0, Hitbox::from_size(30.0, 20.0));
//! let player = Player::new(PlayerId::new(1), spawn, 100);
//!
//! assert_eq!(player.id().as_u32(), 1);
//! assert!(player.is_alive());
//! ```

pub mod components;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use components::{
    Hitbox, Player, PlayerSpawn, Projectile, ANGLE_RANGE, POWER_RANGE,
};

/// Unique identifier for a player.
///
/// Ids are chosen by the host and must be unique within a match. Ordering is
/// numeric, but the engine iterates players in creation order, not id order.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(u32);

impl PlayerId {
    /// Creates a new `PlayerId` from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw value of this identifier.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerId({})", self.0)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player{}", self.0)
    }
}

impl From<u32> for PlayerId {
    fn from(id: u32) -> Self {
        Self::new(id)
    }
}

/// Horizontal movement direction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards negative x
    Left,
    /// Towards positive x
    Right,
}

impl Direction {
    /// Unit sign of this direction.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}
