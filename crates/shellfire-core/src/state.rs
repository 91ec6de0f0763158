//! The aggregate match state.
//!
//! [`MatchState`] is owned exclusively by the [`Engine`](crate::engine::Engine).
//! Other components receive `&`/`&mut` borrows for the duration of one call
//! and never keep copies.
//!
//! # Invariants
//!
//! - At most one projectile exists; "in motion" is derived from its presence
//! - `current_turn` names an existing player whenever any player exists
//! - `winner` is only set while `game_over` is true

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use relief::TerrainField;
use serde::{Deserialize, Serialize};

use crate::ballistics::Playfield;
use crate::entity::{Player, PlayerId, Projectile};
use crate::explosion::ExplosionTracker;

/// Coarse turn-state for hosts and UIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// No combatants have been added yet
    Idle,
    /// Waiting for the named player to fire
    AwaitingShot(PlayerId),
    /// A shell fired by `shooter` is being simulated
    ProjectileInFlight {
        /// Owner of the shell
        shooter: PlayerId,
    },
    /// The match has ended
    GameOver {
        /// Last player standing, or the shooter of a mutual wipe-out
        winner: Option<PlayerId>,
    },
}

/// Everything that changes during a match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub(crate) players: Vec<Player>,
    pub(crate) current_turn: Option<PlayerId>,
    pub(crate) projectile: Option<Projectile>,
    pub(crate) wind_speed: f32,
    pub(crate) game_over: bool,
    pub(crate) winner: Option<PlayerId>,
    pub(crate) terrain: Option<TerrainField>,
    pub(crate) explosions: ExplosionTracker,
}

impl MatchState {
    /// All players in creation order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Look up a player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id() == id)
    }

    /// Player whose turn it is.
    #[must_use]
    pub fn current_turn(&self) -> Option<PlayerId> {
        self.current_turn
    }

    /// The shell in flight, if any.
    #[must_use]
    pub fn projectile(&self) -> Option<&Projectile> {
        self.projectile.as_ref()
    }

    /// True iff a projectile exists.
    #[must_use]
    pub fn is_projectile_in_motion(&self) -> bool {
        self.projectile.is_some()
    }

    /// Signed wind speed.
    #[must_use]
    pub fn wind_speed(&self) -> f32 {
        self.wind_speed
    }

    /// True once the match has ended.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Winner of a finished match.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// The terrain, once initialized.
    #[must_use]
    pub fn terrain(&self) -> Option<&TerrainField> {
        self.terrain.as_ref()
    }

    /// Live explosions.
    #[must_use]
    pub fn explosions(&self) -> &ExplosionTracker {
        &self.explosions
    }

    /// Simulation bounds, once terrain exists.
    #[must_use]
    pub fn playfield(&self) -> Option<Playfield> {
        self.terrain.as_ref().map(Playfield::of)
    }

    /// Number of players with health left.
    #[must_use]
    pub fn living_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_alive()).count()
    }

    /// Coarse turn-state.
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        if self.game_over {
            TurnPhase::GameOver {
                winner: self.winner,
            }
        } else if let Some(projectile) = &self.projectile {
            TurnPhase::ProjectileInFlight {
                shooter: projectile.owner,
            }
        } else {
            self.current_turn
                .map_or(TurnPhase::Idle, TurnPhase::AwaitingShot)
        }
    }

    /// First living player strictly after `from` in creation order, wrapping
    /// around. `from` itself is considered last. Returns `None` if nobody is
    /// alive.
    #[must_use]
    pub fn next_living_after(&self, from: PlayerId) -> Option<PlayerId> {
        let count = self.players.len();
        let start = self
            .players
            .iter()
            .position(|p| p.id() == from)
            .map_or(0, |index| index + 1);
        (0..count)
            .map(|offset| &self.players[(start + offset) % count])
            .find(|p| p.is_alive())
            .map(Player::id)
    }

    /// End the match if at most one player is alive.
    ///
    /// The sole survivor wins; if nobody survives, `shooter` wins. Returns
    /// true if this call ended the match.
    pub(crate) fn settle_victory(&mut self, shooter: PlayerId) -> bool {
        if self.game_over || self.living_count() > 1 {
            return false;
        }
        let mut living = self.players.iter().filter(|p| p.is_alive());
        self.winner = match (living.next(), living.next()) {
            (Some(survivor), None) => Some(survivor.id()),
            _ => Some(shooter),
        };
        self.game_over = true;
        true
    }
}

/// Compute a deterministic hash of match state.
///
/// Floats are hashed as raw bits. Two engines fed the same seed and the same
/// inputs must produce the same hash after every operation.
#[must_use]
pub fn hash_match_state(state: &MatchState) -> u64 {
    let mut hasher = DefaultHasher::new();

    for player in &state.players {
        player.id().hash(&mut hasher);
        player.position.x.to_bits().hash(&mut hasher);
        player.position.y.to_bits().hash(&mut hasher);
        player.velocity.x.to_bits().hash(&mut hasher);
        player.velocity.y.to_bits().hash(&mut hasher);
        player.health().hash(&mut hasher);
        player.angle().to_bits().hash(&mut hasher);
        player.power().to_bits().hash(&mut hasher);
        player.weapon().hash(&mut hasher);
        player.grounded.hash(&mut hasher);
    }

    state.current_turn.hash(&mut hasher);
    match &state.projectile {
        Some(projectile) => {
            true.hash(&mut hasher);
            projectile.position.x.to_bits().hash(&mut hasher);
            projectile.position.y.to_bits().hash(&mut hasher);
            projectile.velocity.x.to_bits().hash(&mut hasher);
            projectile.velocity.y.to_bits().hash(&mut hasher);
            projectile.weapon.hash(&mut hasher);
            projectile.impacts.hash(&mut hasher);
            projectile.owner.hash(&mut hasher);
            projectile.armed.hash(&mut hasher);
        }
        None => false.hash(&mut hasher),
    }
    state.wind_speed.to_bits().hash(&mut hasher);
    state.game_over.hash(&mut hasher);
    state.winner.hash(&mut hasher);

    if let Some(terrain) = &state.terrain {
        relief::hash::hash_terrain_into(terrain, &mut hasher);
    }
    for explosion in state.explosions.as_slice() {
        explosion.position.x.to_bits().hash(&mut hasher);
        explosion.position.y.to_bits().hash(&mut hasher);
        explosion.radius.to_bits().hash(&mut hasher);
        explosion.frame.hash(&mut hasher);
    }

    hasher.finish()
}
