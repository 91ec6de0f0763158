//! State records for players and projectiles.

use std::ops::RangeInclusive;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::entity::PlayerId;
use crate::error::SnapshotError;
use crate::weapon::WeaponId;

/// Valid aim angles in degrees (0 = right, 90 = straight up, 180 = left).
pub const ANGLE_RANGE: RangeInclusive<f32> = 0.0..=180.0;

/// Valid launch power.
pub const POWER_RANGE: RangeInclusive<f32> = 10.0..=100.0;

fn clamp_to(value: f32, range: &RangeInclusive<f32>) -> f32 {
    if value.is_nan() {
        *range.start()
    } else {
        value.clamp(*range.start(), *range.end())
    }
}

/// Axis-aligned hitbox centered on the player's position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    /// Half width and half height
    pub half_extents: Vec2,
}

impl Hitbox {
    /// Build a hitbox from its full width and height.
    #[must_use]
    pub fn from_size(width: f32, height: f32) -> Self {
        Self {
            half_extents: Vec2::new(width, height) * 0.5,
        }
    }

    /// Full width.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.half_extents.x * 2.0
    }

    /// Full height.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.half_extents.y * 2.0
    }

    /// Radius of the circle used for splash reach: half the larger side.
    #[must_use]
    pub fn approximate_radius(&self) -> f32 {
        self.half_extents.max_element()
    }

    /// True if `point` lies inside the box centered at `center` (edges included).
    #[must_use]
    pub fn contains(&self, center: Vec2, point: Vec2) -> bool {
        let offset = (point - center).abs();
        offset.x <= self.half_extents.x && offset.y <= self.half_extents.y
    }
}

/// Everything needed to (re)create a combatant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerSpawn {
    /// Starting center position
    pub position: Vec2,
    /// Starting aim in degrees
    pub angle: f32,
    /// Starting power
    pub power: f32,
    /// Collision box
    pub hitbox: Hitbox,
    /// Starting weapon
    pub weapon: WeaponId,
}

impl PlayerSpawn {
    /// A spawn holding the cannon.
    #[must_use]
    pub fn new(position: Vec2, angle: f32, power: f32, hitbox: Hitbox) -> Self {
        Self {
            position,
            angle,
            power,
            hitbox,
            weapon: WeaponId::Cannon,
        }
    }

    /// Start with a different weapon.
    #[must_use]
    pub fn with_weapon(mut self, weapon: WeaponId) -> Self {
        self.weapon = weapon;
        self
    }
}

/// A combatant.
///
/// # Invariants
///
/// - `health <= max health`, and only decreases until a reset
/// - `angle` stays within [`ANGLE_RANGE`], `power` within [`POWER_RANGE`]
/// - `weapon` is always one of `unlocked`
///
/// Deserialization rejects records that break these invariants rather than
/// clamping them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PlayerRecord")]
pub struct Player {
    id: PlayerId,
    /// Center of the hitbox
    pub position: Vec2,
    health: u32,
    weapon: WeaponId,
    unlocked: [WeaponId; 4],
    angle: f32,
    power: f32,
    /// Collision box
    pub hitbox: Hitbox,
    /// Clock reading of the last accepted shot, `None` if never fired
    pub last_shot_at: Option<f64>,
    /// Velocity in units/tick
    pub velocity: Vec2,
    /// Resting on terrain this tick
    pub grounded: bool,
    spawn: PlayerSpawn,
}

impl Player {
    /// Create a player at full health from a spawn description.
    ///
    /// Angle and power are clamped into range.
    #[must_use]
    pub fn new(id: PlayerId, spawn: PlayerSpawn, max_health: u32) -> Self {
        Self {
            id,
            position: spawn.position,
            health: max_health,
            weapon: spawn.weapon,
            unlocked: WeaponId::ALL,
            angle: clamp_to(spawn.angle, &ANGLE_RANGE),
            power: clamp_to(spawn.power, &POWER_RANGE),
            hitbox: spawn.hitbox,
            last_shot_at: None,
            velocity: Vec2::ZERO,
            grounded: false,
            spawn,
        }
    }

    /// Restore spawn position, aim, weapon, and full health.
    pub fn reset(&mut self, max_health: u32) {
        *self = Self::new(self.id, self.spawn, max_health);
    }

    /// Player id.
    #[must_use]
    pub const fn id(&self) -> PlayerId {
        self.id
    }

    /// Remaining health.
    #[must_use]
    pub const fn health(&self) -> u32 {
        self.health
    }

    /// Still in the fight.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Remove health, never going below zero. Returns the damage actually taken.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.health);
        self.health -= taken;
        taken
    }

    /// Aim angle in degrees.
    #[must_use]
    pub const fn angle(&self) -> f32 {
        self.angle
    }

    /// Set the aim angle, clamped into [`ANGLE_RANGE`].
    pub fn set_angle(&mut self, angle: f32) {
        self.angle = clamp_to(angle, &ANGLE_RANGE);
    }

    /// Launch power.
    #[must_use]
    pub const fn power(&self) -> f32 {
        self.power
    }

    /// Set launch power, clamped into [`POWER_RANGE`].
    pub fn set_power(&mut self, power: f32) {
        self.power = clamp_to(power, &POWER_RANGE);
    }

    /// Selected weapon.
    #[must_use]
    pub const fn weapon(&self) -> WeaponId {
        self.weapon
    }

    /// Weapons this player may select.
    #[must_use]
    pub const fn unlocked(&self) -> &[WeaponId; 4] {
        &self.unlocked
    }

    /// Select `weapon` if unlocked. Returns whether the selection changed hands.
    pub fn select_weapon(&mut self, weapon: WeaponId) -> bool {
        if self.unlocked.contains(&weapon) {
            self.weapon = weapon;
            true
        } else {
            false
        }
    }

    /// How this player was spawned.
    #[must_use]
    pub const fn spawn(&self) -> &PlayerSpawn {
        &self.spawn
    }

    /// True if `point` is inside this player's hitbox.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        self.hitbox.contains(self.position, point)
    }

    /// Seconds since the last accepted shot, or `None` if never fired.
    #[must_use]
    pub fn since_last_shot(&self, now: f64) -> Option<f64> {
        self.last_shot_at.map(|at| now - at)
    }
}

/// Unchecked wire form of [`Player`].
#[derive(Deserialize)]
struct PlayerRecord {
    id: PlayerId,
    position: Vec2,
    health: u32,
    weapon: WeaponId,
    unlocked: [WeaponId; 4],
    angle: f32,
    power: f32,
    hitbox: Hitbox,
    last_shot_at: Option<f64>,
    velocity: Vec2,
    grounded: bool,
    spawn: PlayerSpawn,
}

impl TryFrom<PlayerRecord> for Player {
    type Error = SnapshotError;

    fn try_from(record: PlayerRecord) -> Result<Self, Self::Error> {
        let id = record.id;
        if !ANGLE_RANGE.contains(&record.angle) {
            return Err(SnapshotError::AngleOutOfRange {
                id,
                value: record.angle,
            });
        }
        if !POWER_RANGE.contains(&record.power) {
            return Err(SnapshotError::PowerOutOfRange {
                id,
                value: record.power,
            });
        }
        if !record.unlocked.contains(&record.weapon) {
            return Err(SnapshotError::WeaponLocked {
                id,
                weapon: record.weapon,
            });
        }
        if !record.position.is_finite() || !record.velocity.is_finite() {
            return Err(SnapshotError::NonFinite { id });
        }
        Ok(Self {
            id,
            position: record.position,
            health: record.health,
            weapon: record.weapon,
            unlocked: record.unlocked,
            angle: record.angle,
            power: record.power,
            hitbox: record.hitbox,
            last_shot_at: record.last_shot_at,
            velocity: record.velocity,
            grounded: record.grounded,
            spawn: record.spawn,
        })
    }
}

/// The single shell in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Current position
    pub position: Vec2,
    /// Velocity in units/tick
    pub velocity: Vec2,
    /// Weapon that fired it
    pub weapon: WeaponId,
    /// Bounces or penetrations used so far
    pub impacts: u32,
    /// Player who fired it
    pub owner: PlayerId,
    /// False until the shell has left its owner's hitbox
    pub armed: bool,
}

impl Projectile {
    /// A freshly launched, unarmed projectile.
    #[must_use]
    pub fn launch(owner: PlayerId, weapon: WeaponId, position: Vec2, velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            weapon,
            impacts: 0,
            owner,
            armed: false,
        }
    }
}
