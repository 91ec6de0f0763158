//! Engine configuration.
//!
//! All physics constants are expressed per tick: one tick is the unit of
//! simulation, and the host decides how many ticks to run per rendered frame.
//! Nothing here is scaled by wall-clock time.
//!
//! Every section uses `#[serde(default)]`, so a JSON document only needs the
//! fields it overrides:
//!
//! ```
//! use shellfire_core::config::EngineConfig;
//!
//! let config = EngineConfig::from_json_str(r#"{ "physics": { "gravity": 0.25 } }"#)?;
//! assert_eq!(config.physics.gravity, 0.25);
//! assert_eq!(config.physics.move_speed, 3.0);
//! # Ok::<(), shellfire_core::ConfigError>(())
//! ```

use relief::TerrainConfig;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Kinematic constants shared by players and projectiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration, units/tick²
    pub gravity: f32,
    /// Horizontal velocity factor per tick while grounded
    pub ground_friction: f32,
    /// Horizontal velocity factor per tick while airborne
    pub air_resistance: f32,
    /// Grounded horizontal speed below which a player stops dead
    pub stop_threshold: f32,
    /// Horizontal speed set by a movement impulse, units/tick
    pub move_speed: f32,
    /// Horizontal acceleration per unit of wind, units/tick²
    pub wind_drift: f32,
    /// Launch speed per point of power
    pub launch_scale: f32,
    /// How far above the top edge a projectile may fly before it is lost
    pub ceiling_margin: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            ground_friction: 0.85,
            air_resistance: 0.99,
            stop_threshold: 0.1,
            move_speed: 3.0,
            wind_drift: 0.05,
            launch_scale: 0.5,
            ceiling_margin: 500.0,
        }
    }
}

/// Who receives splash damage when a shot lands directly on a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplashPolicy {
    /// The directly hit player takes only the direct damage.
    #[default]
    ExcludeDirectTarget,
    /// The directly hit player also takes splash damage.
    IncludeDirectTarget,
}

/// Constants governing impacts, specials, and damage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Vertical velocity factor applied (and negated) on a bounce
    pub bounce_restitution: f32,
    /// Horizontal velocity factor applied on a bounce
    pub bounce_horizontal_decay: f32,
    /// Velocity factor applied to both axes on a penetration
    pub penetration_decay: f32,
    /// Crater radius of a penetration, as a fraction of blast radius
    pub penetration_crater_scale: f32,
    /// Distance of cluster markers from the impact point
    pub cluster_offset: f32,
    /// Cluster marker radius, as a fraction of blast radius
    pub cluster_radius_scale: f32,
    /// Animation length of every explosion, in explosion ticks
    pub explosion_frames: u32,
    /// Health of a fresh combatant
    pub max_health: u32,
    /// Splash handling for direct hits
    pub splash_policy: SplashPolicy,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            bounce_restitution: 0.6,
            bounce_horizontal_decay: 0.8,
            penetration_decay: 0.9,
            penetration_crater_scale: 0.5,
            cluster_offset: 30.0,
            cluster_radius_scale: 0.5,
            explosion_frames: 20,
            max_health: 100,
            splash_policy: SplashPolicy::default(),
        }
    }
}

/// Wind generation bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindConfig {
    /// Rolled wind lies in `[-max_speed, max_speed)`
    pub max_speed: f32,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self { max_speed: 1.0 }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Kinematics
    pub physics: PhysicsConfig,
    /// Impacts and damage
    pub combat: CombatConfig,
    /// Wind rolls
    pub wind: WindConfig,
    /// Terrain generation
    pub terrain: TerrainConfig,
    /// Seed for the engine's RNG
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            combat: CombatConfig::default(),
            wind: WindConfig::default(),
            terrain: TerrainConfig::default(),
            seed: 0x5EED,
        }
    }
}

fn check(field: &'static str, value: f32, ok: bool) -> Result<(), ConfigError> {
    if value.is_finite() && ok {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

fn unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    check(field, value, (0.0..=1.0).contains(&value))
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    check(field, value, value >= 0.0)
}

impl EngineConfig {
    /// Same defaults with a different seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and any validation
    /// error from [`EngineConfig::validate`].
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every constant is usable.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.physics;
        non_negative("physics.gravity", p.gravity)?;
        unit("physics.ground_friction", p.ground_friction)?;
        unit("physics.air_resistance", p.air_resistance)?;
        non_negative("physics.stop_threshold", p.stop_threshold)?;
        non_negative("physics.move_speed", p.move_speed)?;
        check("physics.wind_drift", p.wind_drift, true)?;
        check("physics.launch_scale", p.launch_scale, p.launch_scale > 0.0)?;
        non_negative("physics.ceiling_margin", p.ceiling_margin)?;

        let c = &self.combat;
        unit("combat.bounce_restitution", c.bounce_restitution)?;
        unit("combat.bounce_horizontal_decay", c.bounce_horizontal_decay)?;
        unit("combat.penetration_decay", c.penetration_decay)?;
        non_negative("combat.penetration_crater_scale", c.penetration_crater_scale)?;
        non_negative("combat.cluster_offset", c.cluster_offset)?;
        non_negative("combat.cluster_radius_scale", c.cluster_radius_scale)?;
        if c.explosion_frames == 0 {
            return Err(ConfigError::ZeroExplosionFrames);
        }
        #[allow(clippy::cast_precision_loss)]
        check("combat.max_health", c.max_health as f32, c.max_health > 0)?;

        non_negative("wind.max_speed", self.wind.max_speed)?;
        self.terrain.validate()?;
        Ok(())
    }
}
