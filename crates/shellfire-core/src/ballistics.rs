//! Stateless kinematics for players and projectiles.
//!
//! Every function here computes a *candidate* next state from the current one
//! and returns it; callers decide whether to commit it. All constants come
//! from [`PhysicsConfig`] and are applied once per call, so one call is one
//! tick regardless of how much real time passed.
//!
//! World coordinates: `x` grows to the right, `y` grows downward.

use glam::Vec2;
use relief::TerrainField;
use serde::{Deserialize, Serialize};

use crate::config::PhysicsConfig;
use crate::entity::{Direction, Player, Projectile, ANGLE_RANGE};

/// Distance below the hitbox bottom probed for ground contact.
const GROUND_PROBE: f32 = 1.0;

/// Rectangular simulation bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    /// Right edge (left edge is 0)
    pub width: f32,
    /// Bottom edge (top edge is 0)
    pub height: f32,
}

impl Playfield {
    /// Bounds matching a terrain's extent.
    #[must_use]
    pub fn of(terrain: &TerrainField) -> Self {
        Self {
            width: terrain.extent(),
            height: terrain.height(),
        }
    }

    /// True if `point` has left the playfield: past either side, below the
    /// floor, or more than `ceiling_margin` above the top. A non-finite point
    /// is never in play.
    #[must_use]
    pub fn is_outside(&self, point: Vec2, ceiling_margin: f32) -> bool {
        !point.is_finite()
            || point.y > self.height
            || point.x < 0.0
            || point.x > self.width
            || point.y < -ceiling_margin
    }
}

/// Candidate player state after one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerMotion {
    /// New hitbox center
    pub position: Vec2,
    /// New velocity
    pub velocity: Vec2,
    /// Resting on terrain
    pub grounded: bool,
}

/// Advance a player by one tick: gravity, wall clamping, grounding, friction.
#[must_use]
pub fn step_player(player: &Player, terrain: &TerrainField, physics: &PhysicsConfig) -> PlayerMotion {
    let half = player.hitbox.half_extents;
    let width = terrain.extent();

    let mut velocity = Vec2::new(player.velocity.x, player.velocity.y + physics.gravity);
    let mut position = player.position + velocity;

    if position.x - half.x < 0.0 {
        position.x = half.x;
        velocity.x = 0.0;
    } else if position.x + half.x > width {
        position.x = width - half.x;
        velocity.x = 0.0;
    }

    let grounded = terrain.is_below_surface(position.x, position.y + half.y + GROUND_PROBE);
    if grounded {
        position.y = terrain.height_at(position.x) - half.y;
        velocity.y = 0.0;
        if player.velocity.x != 0.0 {
            velocity.x *= physics.ground_friction;
            if velocity.x.abs() < physics.stop_threshold {
                velocity.x = 0.0;
            }
        }
    } else {
        velocity.x *= physics.air_resistance;
    }

    PlayerMotion {
        position,
        velocity,
        grounded,
    }
}

/// Result of advancing a projectile by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectileStep {
    /// Still in play at the new state
    Moved {
        /// New position
        position: Vec2,
        /// New velocity
        velocity: Vec2,
    },
    /// Left the playfield; the shot ends without exploding
    OutOfBounds,
}

/// Advance a projectile by one tick: move, then apply wind and gravity.
#[must_use]
pub fn step_projectile(
    projectile: &Projectile,
    wind_speed: f32,
    playfield: Playfield,
    physics: &PhysicsConfig,
) -> ProjectileStep {
    let position = projectile.position + projectile.velocity;
    if playfield.is_outside(position, physics.ceiling_margin) {
        return ProjectileStep::OutOfBounds;
    }
    let velocity = projectile.velocity + Vec2::new(wind_speed * physics.wind_drift, physics.gravity);
    ProjectileStep::Moved { position, velocity }
}

/// Apply a movement impulse. Only grounded players can be steered.
///
/// Returns whether the impulse was applied.
pub fn apply_move(player: &mut Player, direction: Direction, physics: &PhysicsConfig) -> bool {
    if !player.grounded {
        return false;
    }
    player.velocity.x = direction.sign() * physics.move_speed;
    true
}

/// Aim angle in degrees from `from` toward `target`.
///
/// Measured counter-clockwise from the positive x axis with `y` flipped to
/// point up, normalized to `[0, 360)`, then clamped to the upper half-plane.
#[must_use]
pub fn aim_angle(from: Vec2, target: Vec2) -> f32 {
    let delta = target - from;
    let mut degrees = (-delta.y).atan2(delta.x).to_degrees();
    if degrees < 0.0 {
        degrees += 360.0;
    }
    degrees.clamp(*ANGLE_RANGE.start(), *ANGLE_RANGE.end())
}

/// Launch velocity for a shot at `angle` degrees and `power`.
#[must_use]
pub fn launch_velocity(
    angle: f32,
    power: f32,
    velocity_multiplier: f32,
    physics: &PhysicsConfig,
) -> Vec2 {
    let speed = power * physics.launch_scale * velocity_multiplier;
    let radians = angle.to_radians();
    Vec2::new(radians.cos() * speed, -radians.sin() * speed)
}
