//! # Shellfire Core
//!
//! Turn-based 2D artillery duel simulation.
//!
//! Players sit on deformable [`relief`] terrain, aim, pick one of four
//! weapons, and take turns lobbing a single shell across the playfield under
//! gravity and wind. The engine resolves direct hits, splash damage, cluster
//! markers, bouncing, and terrain penetration, and decides when the match is
//! over.
//!
//! ## Architecture
//!
//! - **Entities**: players and the single projectile ([`entity`])
//! - **Ballistics**: stateless per-tick kinematics ([`ballistics`])
//! - **Resolver**: projectile contacts, damage, and victory ([`resolver`])
//! - **Engine**: the turn controller that owns [`MatchState`] ([`engine`])
//!
//! Rendering and audio live outside the engine. They subscribe to
//! [`MatchEvent`]s and read state through the engine's queries.
//!
//! ## Usage
//!
//! ```
//! use shellfire_core::{Engine, EngineConfig};
//! use shellfire_core::entity::{Hitbox, PlayerId, PlayerSpawn};
//! use shellfire_core::event::{EventLog, EventMask, MatchEvent};
//! use glam::Vec2;
//!
//! let mut engine = Engine::new(EngineConfig::default())?;
//! let sounds = EventLog::new();
//! engine.subscribe(EventMask::AUDIO, sounds.clone());
//!
//! engine.initialize_terrain(800, 600.0)?;
//! let hitbox = Hitbox::from_size(30.0, 20.0);
//! let p1 = PlayerId::new(1);
//! engine.add_player(p1, PlayerSpawn::new(Vec2::new(100.0, 400.0), 45.0, 50.0, hitbox))?;
//!
//! assert!(engine.shoot(p1));
//! assert!(matches!(sounds.take_events().as_slice(), [MatchEvent::ShotFired { .. }]));
//! # Ok::<(), shellfire_core::EngineError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export relief for terrain queries
pub use relief;

pub mod ballistics;
pub mod clock;
pub mod config;
pub mod engine;
pub mod entity;
pub mod error;
pub mod event;
pub mod explosion;
pub mod resolver;
pub mod state;
pub mod weapon;

pub use config::{CombatConfig, EngineConfig, PhysicsConfig, SplashPolicy, WindConfig};
pub use engine::{Engine, FlightTick};
pub use error::{ConfigError, EngineError, SnapshotError};
pub use event::MatchEvent;
pub use state::{hash_match_state, MatchState, TurnPhase};
pub use weapon::{Special, Weapon, WeaponCatalog, WeaponId};

#[cfg(test)]
mod tests;
