//! Terrain generation and deformation parameters.

use serde::{Deserialize, Serialize};

use crate::TerrainError;

/// A single sine component of the generated height profile.
///
/// The sample at column `x` is offset by `sin(x * frequency) * amplitude`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wave {
    /// Angular frequency per horizontal unit
    pub frequency: f32,
    /// Peak offset in world units
    pub amplitude: f32,
}

impl Wave {
    /// Create a new wave component.
    #[must_use]
    pub const fn new(frequency: f32, amplitude: f32) -> Self {
        Self {
            frequency,
            amplitude,
        }
    }

    /// Offset contributed by this wave at column `x`.
    #[must_use]
    pub fn offset_at(&self, x: f32) -> f32 {
        (x * self.frequency).sin() * self.amplitude
    }
}

/// Configuration for terrain generation and cratering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Distance of the mean surface above the bottom of the playfield
    pub baseline_depth: f32,
    /// Sine components summed into the profile
    pub waves: Vec<Wave>,
    /// Maximum depth a crater digs at its center
    pub crater_strength: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            baseline_depth: 100.0,
            waves: vec![Wave::new(0.02, 20.0), Wave::new(0.05, 15.0)],
            crater_strength: 20.0,
        }
    }
}

impl TerrainConfig {
    /// A perfectly flat profile at the default baseline, handy for tests.
    #[must_use]
    pub fn flat() -> Self {
        Self {
            waves: Vec::new(),
            ..Self::default()
        }
    }

    /// Check every parameter is usable.
    ///
    /// # Errors
    ///
    /// Returns the first [`TerrainError`] found.
    pub fn validate(&self) -> Result<(), TerrainError> {
        if !self.baseline_depth.is_finite() {
            return Err(TerrainError::InvalidBaseline(self.baseline_depth));
        }
        for (index, wave) in self.waves.iter().enumerate() {
            if !wave.frequency.is_finite() || !wave.amplitude.is_finite() {
                return Err(TerrainError::InvalidWave {
                    index,
                    frequency: wave.frequency,
                    amplitude: wave.amplitude,
                });
            }
        }
        if !self.crater_strength.is_finite() || self.crater_strength < 0.0 {
            return Err(TerrainError::InvalidStrength(self.crater_strength));
        }
        Ok(())
    }
}
