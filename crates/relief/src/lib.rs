//! # Relief
//!
//! Deformable height-profile terrain for a 2D artillery duel.
//!
//! Relief stores the playfield's ground as one height sample per horizontal
//! unit. World coordinates follow screen conventions: `x` grows to the right,
//! `y` grows downward, so a *larger* sample value means *lower* ground.
//!
//! - **Generation**: rolling hills from a sum of sine waves, fully
//!   deterministic for a given width, height, and [`TerrainConfig`]
//! - **Point queries**: surface height lookup and "is this point inside solid
//!   ground" checks, clamped to the sampled range
//! - **Craters**: localized deformation that only ever lowers the surface
//!
//! ## Quick Start
//!
//! ```
//! use relief::TerrainField;
//! use glam::Vec2;
//!
//! let mut terrain = TerrainField::generate(800, 600.0)?;
//! let before = terrain.height_at(400.0);
//!
//! // Blast a crater right on the surface
//! terrain.deform(Vec2::new(400.0, before), 30.0);
//!
//! assert!(terrain.height_at(400.0) > before);
//! # Ok::<(), relief::TerrainError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod crater;
pub mod field;
pub mod hash;

// Re-exports for convenience
pub use config::{TerrainConfig, Wave};
pub use crater::Crater;
pub use field::TerrainField;
pub use hash::hash_terrain;

/// Errors raised while building a terrain field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    /// The playfield must be at least one unit wide.
    #[error("terrain width must be at least 1, got {0}")]
    ZeroWidth(usize),

    /// The playfield height must be finite and positive.
    #[error("terrain height must be finite and positive, got {0}")]
    InvalidHeight(f32),

    /// A generation wave has a non-finite frequency or amplitude.
    #[error("wave {index} is invalid: frequency={frequency}, amplitude={amplitude}")]
    InvalidWave {
        /// Position of the wave in the config
        index: usize,
        /// Offending frequency
        frequency: f32,
        /// Offending amplitude
        amplitude: f32,
    },

    /// A stored surface sample is NaN or infinite.
    #[error("terrain sample {column} is not finite: {value}")]
    InvalidSample {
        /// Offending column
        column: usize,
        /// Stored value
        value: f32,
    },

    /// Crater strength must be finite and non-negative.
    #[error("crater strength must be finite and non-negative, got {0}")]
    InvalidStrength(f32),

    /// Baseline depth must be finite.
    #[error("baseline depth must be finite, got {0}")]
    InvalidBaseline(f32),
}
