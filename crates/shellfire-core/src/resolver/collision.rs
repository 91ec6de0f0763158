//! Projectile contact resolution.
//!
//! Runs once per projectile tick against the projectile's committed position.
//!
//! # Processing Order
//!
//! 1. Arm the shell once it has left its owner's hitbox
//! 2. Player-hit check, in player creation order
//! 3. Terrain check, only if no player was hit
//!
//! A player hit or a terrain blast detonates the shell. Bounces and
//! penetrations mutate it in place and leave it in flight.

use std::f32::consts::TAU;

use glam::Vec2;
use relief::TerrainField;
use tracing::debug;

use crate::config::CombatConfig;
use crate::entity::{Player, Projectile};
use crate::event::MatchEvent;
use crate::explosion::{Explosion, ExplosionTracker};
use crate::state::MatchState;
use crate::weapon::{Special, Weapon, WeaponCatalog};

use super::damage::{apply_direct, apply_splash};
use super::Impact;

/// Distance above the surface a bouncing shell is placed after rebounding.
const BOUNCE_CLEARANCE: f32 = 1.0;

/// Resolver for projectile contacts with players and terrain.
///
/// # Example
///
/// ```
/// use shellfire_core::config::CombatConfig;
/// use shellfire_core::resolver::{CollisionResolver, Impact};
/// use shellfire_core::state::MatchState;
///
/// let resolver = CollisionResolver::new(CombatConfig::default());
/// let mut state = MatchState::default();
/// let mut events = Vec::new();
/// assert_eq!(resolver.resolve(&mut state, &mut events), Impact::Clear);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CollisionResolver {
    combat: CombatConfig,
}

/// What one contact did to health, before victory is evaluated.
struct Contact {
    impact: Impact,
    damaged: bool,
}

impl Contact {
    const fn passive(impact: Impact) -> Self {
        Self {
            impact,
            damaged: false,
        }
    }
}

impl CollisionResolver {
    /// Creates a resolver with the given combat constants.
    #[must_use]
    pub fn new(combat: CombatConfig) -> Self {
        Self { combat }
    }

    /// Combat constants in use.
    #[must_use]
    pub fn combat(&self) -> &CombatConfig {
        &self.combat
    }

    /// Resolve the projectile in `state` against players and terrain.
    ///
    /// Events are appended to `events` in the order they happened. The
    /// projectile itself is never removed here; on [`Impact::Detonated`] the
    /// caller consumes it.
    pub fn resolve(&self, state: &mut MatchState, events: &mut Vec<MatchEvent>) -> Impact {
        let Some(shooter) = state.projectile.as_ref().map(|p| p.owner) else {
            return Impact::Clear;
        };

        let contact = self.contact(state, events);
        match contact.impact {
            Impact::Detonated { target, .. } => {
                let ended = contact.damaged && state.settle_victory(shooter);
                Impact::Detonated { target, ended }
            }
            other => other,
        }
    }

    fn contact(&self, state: &mut MatchState, events: &mut Vec<MatchEvent>) -> Contact {
        let MatchState {
            players,
            projectile,
            terrain,
            explosions,
            ..
        } = state;
        let Some(shell) = projectile.as_mut() else {
            return Contact::passive(Impact::Clear);
        };
        let weapon = WeaponCatalog::get(shell.weapon);

        arm(shell, players);

        if let Some(index) = struck_player(shell, players) {
            return self.direct_hit(shell, weapon, index, players, explosions, events);
        }

        match terrain {
            Some(terrain) if terrain.is_below_surface(shell.position.x, shell.position.y) => {
                self.terrain_hit(shell, weapon, terrain, players, explosions, events)
            }
            _ => Contact::passive(Impact::Clear),
        }
    }

    fn direct_hit(
        &self,
        shell: &Projectile,
        weapon: &Weapon,
        index: usize,
        players: &mut [Player],
        explosions: &mut ExplosionTracker,
        events: &mut Vec<MatchEvent>,
    ) -> Contact {
        let point = shell.position;
        let target = players[index].id();
        debug!(
            shooter = %shell.owner,
            %target,
            weapon = %weapon.id,
            x = point.x,
            y = point.y,
            "direct hit"
        );

        self.record_explosion(explosions, events, point, weapon.blast_radius, false);
        if let Some(Special::Cluster(count)) = weapon.special {
            for marker in cluster_points(point, count, self.combat.cluster_offset) {
                let radius = weapon.blast_radius * self.combat.cluster_radius_scale;
                self.record_explosion(explosions, events, marker, radius, true);
            }
        }

        let mut damaged = apply_direct(&mut players[index], weapon, shell.owner, events);
        damaged |= apply_splash(
            players,
            point,
            weapon,
            Some(target),
            self.combat.splash_policy,
            shell.owner,
            events,
        );

        Contact {
            impact: Impact::Detonated {
                target: Some(target),
                ended: false,
            },
            damaged,
        }
    }

    fn terrain_hit(
        &self,
        shell: &mut Projectile,
        weapon: &Weapon,
        terrain: &mut TerrainField,
        players: &mut [Player],
        explosions: &mut ExplosionTracker,
        events: &mut Vec<MatchEvent>,
    ) -> Contact {
        let point = shell.position;
        match weapon.special {
            Some(Special::Bounce(limit)) if shell.impacts < limit => {
                shell.velocity.y *= -self.combat.bounce_restitution;
                shell.velocity.x *= self.combat.bounce_horizontal_decay;
                shell.impacts += 1;
                shell.position.y = terrain.height_at(point.x) - BOUNCE_CLEARANCE;
                debug!(bounces = shell.impacts, x = point.x, y = point.y, "projectile bounced");
                events.push(MatchEvent::ProjectileBounced {
                    position: point,
                    bounces: shell.impacts,
                });
                return Contact::passive(Impact::Bounced);
            }
            Some(Special::Penetrate(limit)) => {
                terrain.deform(point, weapon.blast_radius * self.combat.penetration_crater_scale);
                if shell.impacts < limit {
                    shell.impacts += 1;
                    shell.velocity *= self.combat.penetration_decay;
                    debug!(
                        penetrations = shell.impacts,
                        x = point.x,
                        y = point.y,
                        "terrain penetrated"
                    );
                    events.push(MatchEvent::TerrainPenetrated {
                        position: point,
                        penetrations: shell.impacts,
                    });
                    return Contact::passive(Impact::Penetrated);
                }
            }
            _ => {}
        }

        debug!(weapon = %weapon.id, x = point.x, y = point.y, "terrain blast");
        self.record_explosion(explosions, events, point, weapon.blast_radius, false);
        terrain.deform(point, weapon.blast_radius);
        let damaged = apply_splash(
            players,
            point,
            weapon,
            None,
            self.combat.splash_policy,
            shell.owner,
            events,
        );

        Contact {
            impact: Impact::Detonated {
                target: None,
                ended: false,
            },
            damaged,
        }
    }

    fn record_explosion(
        &self,
        explosions: &mut ExplosionTracker,
        events: &mut Vec<MatchEvent>,
        position: Vec2,
        radius: f32,
        cluster: bool,
    ) {
        explosions.push(Explosion::new(position, radius, self.combat.explosion_frames));
        events.push(MatchEvent::Explosion {
            position,
            radius,
            cluster,
        });
    }
}

/// Mark the shell armed once it is outside its owner's hitbox.
fn arm(shell: &mut Projectile, players: &[Player]) {
    if shell.armed {
        return;
    }
    let inside_owner = players
        .iter()
        .find(|p| p.id() == shell.owner)
        .is_some_and(|owner| owner.contains(shell.position));
    if !inside_owner {
        shell.armed = true;
    }
}

/// Index of the first living player whose hitbox contains the shell.
fn struck_player(shell: &Projectile, players: &[Player]) -> Option<usize> {
    players.iter().position(|player| {
        player.is_alive()
            && (shell.armed || player.id() != shell.owner)
            && player.contains(shell.position)
    })
}

/// Evenly spaced points on a circle of `offset` around `center`.
#[allow(clippy::cast_precision_loss)]
fn cluster_points(center: Vec2, count: u32, offset: f32) -> impl Iterator<Item = Vec2> {
    (0..count).map(move |i| {
        let angle = TAU * i as f32 / count as f32;
        center + Vec2::new(angle.cos(), angle.sin()) * offset
    })
}
