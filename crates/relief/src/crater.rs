//! Craters: the mutation primitive for terrain.
//!
//! A crater describes a circular blast and how deep it digs. Applying a crater
//! to a [`TerrainField`](crate::TerrainField) lowers every surface sample that
//! lies strictly inside the circle, with linear falloff from the center.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A circular deformation with linear depth falloff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Crater {
    /// Blast center in world coordinates
    pub center: Vec2,
    /// Blast radius; samples at or beyond it are untouched
    pub radius: f32,
    /// Depth dug at distance zero
    pub strength: f32,
}

impl Crater {
    /// Create a new crater.
    #[must_use]
    pub const fn new(center: Vec2, radius: f32, strength: f32) -> Self {
        Self {
            center,
            radius,
            strength,
        }
    }

    /// How far the surface point `point` is pushed down by this crater.
    ///
    /// Returns `None` when the point is outside the radius. A non-positive
    /// radius affects nothing.
    #[must_use]
    pub fn depth_at(&self, point: Vec2) -> Option<f32> {
        if self.radius <= 0.0 {
            return None;
        }
        let distance = point.distance(self.center);
        if distance < self.radius {
            Some(self.strength * (1.0 - distance / self.radius))
        } else {
            None
        }
    }

    /// Leftmost and rightmost columns the crater can reach, unclamped.
    #[must_use]
    pub fn column_span(&self) -> (f32, f32) {
        (self.center.x - self.radius, self.center.x + self.radius)
    }
}
