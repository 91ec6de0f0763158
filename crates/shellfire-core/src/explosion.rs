//! Explosion lifecycle ledger.
//!
//! An [`Explosion`] is a pure timer: it has no physical effect after it is
//! created. Damage and cratering happen in the resolver at the moment of
//! impact; the tracker only tells a renderer which blasts are still animating.
//!
//! # Advance convention
//!
//! [`ExplosionTracker::advance`] increments every frame counter first, then
//! drops explosions whose counter has reached their maximum. A blast created
//! with `max_frames = 20` is therefore visible for exactly 20 advances.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A blast animation in progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    /// Blast center
    pub position: Vec2,
    /// Blast radius
    pub radius: f32,
    /// Frames elapsed
    pub frame: u32,
    /// Frames until removal
    pub max_frames: u32,
}

impl Explosion {
    /// A new blast at frame zero.
    #[must_use]
    pub const fn new(position: Vec2, radius: f32, max_frames: u32) -> Self {
        Self {
            position,
            radius,
            frame: 0,
            max_frames,
        }
    }

    /// Fraction of the animation elapsed, in `[0, 1]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f32 {
        if self.max_frames == 0 {
            1.0
        } else {
            (self.frame as f32 / self.max_frames as f32).min(1.0)
        }
    }

    /// True once the animation has run its course.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.frame >= self.max_frames
    }
}

/// Ordered list of live explosions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExplosionTracker {
    explosions: Vec<Explosion>,
}

impl ExplosionTracker {
    /// An empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a blast.
    pub fn push(&mut self, explosion: Explosion) {
        self.explosions.push(explosion);
    }

    /// Advance every blast by one frame and drop finished ones.
    ///
    /// Returns how many were dropped.
    pub fn advance(&mut self) -> usize {
        for explosion in &mut self.explosions {
            explosion.frame = explosion.frame.saturating_add(1);
        }
        let before = self.explosions.len();
        self.explosions.retain(|e| !e.is_finished());
        let expired = before - self.explosions.len();
        if expired > 0 {
            trace!(expired, live = self.explosions.len(), "explosions expired");
        }
        expired
    }

    /// Live blasts in creation order.
    #[must_use]
    pub fn as_slice(&self) -> &[Explosion] {
        &self.explosions
    }

    /// Number of live blasts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.explosions.len()
    }

    /// True if nothing is animating.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.explosions.is_empty()
    }

    /// Drop every blast.
    pub fn clear(&mut self) {
        self.explosions.clear();
    }
}
