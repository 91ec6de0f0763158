//! The fixed weapon catalog.
//!
//! Weapons are never granted dynamically, so [`WeaponId`] is a closed enum and
//! [`WeaponCatalog::get`] is total: an id that is not in the catalog cannot be
//! constructed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Identifier of a catalog weapon.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponId {
    /// Plain shell, no special effect
    Cannon,
    /// Cluster warhead
    Rocket,
    /// Penetrates terrain before detonating
    Mortar,
    /// Bounces off terrain before detonating
    Grenade,
}

impl WeaponId {
    /// Every weapon, in selector order.
    pub const ALL: [WeaponId; 4] = [Self::Cannon, Self::Rocket, Self::Mortar, Self::Grenade];

    /// Weapon bound to selector slot `slot` (1-based, as on a number row).
    #[must_use]
    pub fn from_slot(slot: u8) -> Option<Self> {
        Self::ALL.get(usize::from(slot).checked_sub(1)?).copied()
    }

    /// Catalog key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cannon => "cannon",
            Self::Rocket => "rocket",
            Self::Mortar => "mortar",
            Self::Grenade => "grenade",
        }
    }
}

impl fmt::Display for WeaponId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeaponId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| EngineError::UnknownWeapon(s.to_owned()))
    }
}

/// Per-weapon modifier applied on impact.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Special {
    /// A direct hit spawns this many cosmetic secondary blasts
    Cluster(u32),
    /// Bounces off terrain up to this many times
    Bounce(u32),
    /// Punches through terrain up to this many times
    Penetrate(u32),
}

/// Immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Weapon {
    /// Catalog key
    pub id: WeaponId,
    /// Display name
    pub name: &'static str,
    /// Direct-hit damage
    pub damage: u32,
    /// Blast radius in world units
    pub blast_radius: f32,
    /// Launch speed multiplier
    pub velocity_multiplier: f32,
    /// Minimum seconds between two shots of this weapon by the same player
    pub reload_seconds: f64,
    /// Impact modifier
    pub special: Option<Special>,
}

static CANNON: Weapon = Weapon {
    id: WeaponId::Cannon,
    name: "Cannon",
    damage: 25,
    blast_radius: 30.0,
    velocity_multiplier: 1.0,
    reload_seconds: 1.0,
    special: None,
};

static ROCKET: Weapon = Weapon {
    id: WeaponId::Rocket,
    name: "Rocket Launcher",
    damage: 35,
    blast_radius: 40.0,
    velocity_multiplier: 1.2,
    reload_seconds: 2.0,
    special: Some(Special::Cluster(3)),
};

static MORTAR: Weapon = Weapon {
    id: WeaponId::Mortar,
    name: "Mortar",
    damage: 45,
    blast_radius: 50.0,
    velocity_multiplier: 0.8,
    reload_seconds: 3.0,
    special: Some(Special::Penetrate(2)),
};

static GRENADE: Weapon = Weapon {
    id: WeaponId::Grenade,
    name: "Grenade Launcher",
    damage: 30,
    blast_radius: 35.0,
    velocity_multiplier: 0.9,
    reload_seconds: 2.0,
    special: Some(Special::Bounce(2)),
};

/// Static lookup table of weapon definitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeaponCatalog;

impl WeaponCatalog {
    /// Look up a weapon definition.
    #[must_use]
    pub fn get(id: WeaponId) -> &'static Weapon {
        match id {
            WeaponId::Cannon => &CANNON,
            WeaponId::Rocket => &ROCKET,
            WeaponId::Mortar => &MORTAR,
            WeaponId::Grenade => &GRENADE,
        }
    }

    /// Every weapon, in selector order.
    pub fn iter() -> impl Iterator<Item = &'static Weapon> {
        WeaponId::ALL.into_iter().map(Self::get)
    }
}
