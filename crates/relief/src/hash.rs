//! State hashing for determinism verification.
//!
//! Two fields built from the same dimensions and subjected to the same craters
//! must produce identical hashes.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::TerrainField;

/// Compute a deterministic hash of a terrain field.
///
/// Covers the playfield height, crater strength, and every sample (hashed
/// as raw bits to avoid float comparison issues).
#[must_use]
pub fn hash_terrain(terrain: &TerrainField) -> u64 {
    let mut hasher = DefaultHasher::new();
    hash_terrain_into(terrain, &mut hasher);
    hasher.finish()
}

/// Feed a terrain field into an existing hasher.
pub fn hash_terrain_into<H: Hasher>(terrain: &TerrainField, hasher: &mut H) {
    terrain.width().hash(hasher);
    terrain.height().to_bits().hash(hasher);
    terrain.config().crater_strength.to_bits().hash(hasher);
    for sample in terrain.samples() {
        sample.to_bits().hash(hasher);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_hash_identical_fields() {
        let a = TerrainField::generate(100, 200.0).unwrap();
        let b = TerrainField::generate(100, 200.0).unwrap();
        assert_eq!(hash_terrain(&a), hash_terrain(&b));
    }

    #[test]
    fn test_hash_different_dimensions() {
        let a = TerrainField::generate(100, 200.0).unwrap();
        let b = TerrainField::generate(101, 200.0).unwrap();
        assert_ne!(hash_terrain(&a), hash_terrain(&b));
    }

    #[test]
    fn test_hash_after_same_craters() {
        let mut a = TerrainField::generate(100, 200.0).unwrap();
        let mut b = TerrainField::generate(100, 200.0).unwrap();
        let center = Vec2::new(40.0, a.height_at(40.0));
        a.deform(center, 15.0);
        b.deform(center, 15.0);
        assert_eq!(hash_terrain(&a), hash_terrain(&b));
    }

    #[test]
    fn test_hash_changes_after_crater() {
        let mut terrain = TerrainField::generate(100, 200.0).unwrap();
        let before = hash_terrain(&terrain);
        terrain.deform(Vec2::new(40.0, terrain.height_at(40.0)), 15.0);
        assert_ne!(before, hash_terrain(&terrain));
    }
}
