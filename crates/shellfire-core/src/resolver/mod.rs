//! Collision and damage resolution.
//!
//! The engine moves the projectile; the resolver decides what that move did.
//! It is the only place health drops, terrain is cratered by shots, and
//! explosions are created.
//!
//! - [`CollisionResolver`]: projectile vs. players, then projectile vs. terrain
//! - [`damage`]: direct and splash damage rules
//!
//! # Invariants
//!
//! - Resolution is deterministic given the same state
//! - Players are tested in creation order; the first hit wins
//! - Victory is evaluated only after health actually changed

mod collision;
pub mod damage;

pub use collision::CollisionResolver;

use serde::{Deserialize, Serialize};

use crate::entity::PlayerId;

/// Outcome of resolving one projectile tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    /// No contact; the shell keeps flying
    Clear,
    /// Rebounded off terrain
    Bounced,
    /// Punched through terrain
    Penetrated,
    /// Exploded; the caller consumes the projectile
    Detonated {
        /// Player struck directly, `None` for a terrain blast
        target: Option<PlayerId>,
        /// True if this blast ended the match
        ended: bool,
    },
}

impl Impact {
    /// True if the projectile must be removed.
    #[must_use]
    pub const fn consumes_projectile(&self) -> bool {
        matches!(self, Self::Detonated { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_detonation_consumes() {
        assert!(!Impact::Clear.consumes_projectile());
        assert!(!Impact::Bounced.consumes_projectile());
        assert!(!Impact::Penetrated.consumes_projectile());
        assert!(Impact::Detonated {
            target: None,
            ended: false
        }
        .consumes_projectile());
    }
}
