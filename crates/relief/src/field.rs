//! The terrain height profile.
//!
//! [`TerrainField`] owns one surface sample per integer column in
//! `[0, width)`. Samples are y-coordinates of the ground surface, so solid
//! terrain occupies every point with `y >= sample`.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::TerrainConfig;
use crate::crater::Crater;
use crate::TerrainError;

/// Deformable 1D height profile over a fixed horizontal extent.
///
/// # Invariants
///
/// - `samples.len() == width` at all times
/// - Deformation only increases sample values (lowers the ground)
///
/// Deserialized fields are checked against the same rules as
/// [`generate_with`](Self::generate_with), plus finite samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FieldRecord")]
pub struct TerrainField {
    /// Surface y per column
    samples: Vec<f32>,
    /// Nominal playfield height (bottom edge)
    height: f32,
    /// Generation and cratering parameters
    config: TerrainConfig,
}

/// Unchecked wire form of [`TerrainField`].
#[derive(Deserialize)]
struct FieldRecord {
    samples: Vec<f32>,
    height: f32,
    config: TerrainConfig,
}

impl TryFrom<FieldRecord> for TerrainField {
    type Error = TerrainError;

    fn try_from(record: FieldRecord) -> Result<Self, Self::Error> {
        let FieldRecord {
            samples,
            height,
            config,
        } = record;
        if samples.is_empty() {
            return Err(TerrainError::ZeroWidth(0));
        }
        if !height.is_finite() || height <= 0.0 {
            return Err(TerrainError::InvalidHeight(height));
        }
        if let Some(column) = samples.iter().position(|s| !s.is_finite()) {
            return Err(TerrainError::InvalidSample {
                column,
                value: samples[column],
            });
        }
        config.validate()?;
        Ok(Self {
            samples,
            height,
            config,
        })
    }
}

impl TerrainField {
    /// Generate rolling hills with the default [`TerrainConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError`] if `width` is zero or `height` is not a
    /// finite positive number.
    pub fn generate(width: usize, height: f32) -> Result<Self, TerrainError> {
        Self::generate_with(width, height, TerrainConfig::default())
    }

    /// Generate a profile with custom parameters.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError`] if the dimensions or config are invalid.
    pub fn generate_with(
        width: usize,
        height: f32,
        config: TerrainConfig,
    ) -> Result<Self, TerrainError> {
        if width == 0 {
            return Err(TerrainError::ZeroWidth(width));
        }
        if !height.is_finite() || height <= 0.0 {
            return Err(TerrainError::InvalidHeight(height));
        }
        config.validate()?;

        let samples = Self::profile(width, height, &config);
        Ok(Self {
            samples,
            height,
            config,
        })
    }

    #[allow(clippy::cast_precision_loss)]
    fn profile(width: usize, height: f32, config: &TerrainConfig) -> Vec<f32> {
        let baseline = height - config.baseline_depth;
        (0..width)
            .map(|column| {
                let x = column as f32;
                baseline + config.waves.iter().map(|w| w.offset_at(x)).sum::<f32>()
            })
            .collect()
    }

    /// Throw away all craters and rebuild the original profile.
    pub fn regenerate(&mut self) {
        self.samples = Self::profile(self.samples.len(), self.height, &self.config);
    }

    /// Number of columns (equals the playfield width).
    #[must_use]
    pub fn width(&self) -> usize {
        self.samples.len()
    }

    /// Playfield width as a world-space extent.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn extent(&self) -> f32 {
        self.samples.len() as f32
    }

    /// Nominal playfield height.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Generation and cratering parameters.
    #[must_use]
    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// All surface samples, left to right.
    #[must_use]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Column index nearest to `x`, clamped into the sampled range.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn column_at(&self, x: f32) -> usize {
        let last = self.samples.len() - 1;
        let rounded = x.round();
        if rounded.is_nan() || rounded <= 0.0 {
            0
        } else {
            (rounded as usize).min(last)
        }
    }

    /// Surface y at horizontal position `x`.
    ///
    /// Positions outside the playfield read the nearest edge column.
    #[must_use]
    pub fn height_at(&self, x: f32) -> f32 {
        self.samples[self.column_at(x)]
    }

    /// True if `(x, y)` is at or below the surface, i.e. inside solid ground.
    #[must_use]
    pub fn is_below_surface(&self, x: f32, y: f32) -> bool {
        y >= self.height_at(x)
    }

    /// Dig a crater at `center` using the configured strength.
    ///
    /// Repeated craters at the same point keep lowering the surface.
    /// Returns the number of columns that changed.
    pub fn deform(&mut self, center: Vec2, radius: f32) -> usize {
        let crater = Crater::new(center, radius, self.config.crater_strength);
        self.apply(&crater)
    }

    /// Apply an explicit crater.
    ///
    /// Returns the number of columns that changed.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn apply(&mut self, crater: &Crater) -> usize {
        let (left, right) = crater.column_span();
        if right < 0.0 || left > self.extent() {
            return 0;
        }
        let first = left.floor().max(0.0) as usize;
        let last = (right.ceil() as usize).min(self.samples.len() - 1);

        let mut changed = 0;
        for column in first..=last {
            let sample = &mut self.samples[column];
            if let Some(depth) = crater.depth_at(Vec2::new(column as f32, *sample)) {
                if depth > 0.0 {
                    *sample += depth;
                    changed += 1;
                }
            }
        }

        trace!(
            x = crater.center.x,
            y = crater.center.y,
            radius = crater.radius,
            changed,
            "terrain deformed"
        );
        changed
    }
}
