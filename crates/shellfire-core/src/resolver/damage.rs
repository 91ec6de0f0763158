//! Damage application: direct hits and blast splash.
//!
//! Health only ever goes down here. Callers decide when to evaluate victory;
//! every function reports whether any health actually changed so they can.

use glam::Vec2;

use crate::config::SplashPolicy;
use crate::entity::{Player, PlayerId};
use crate::event::MatchEvent;
use crate::weapon::Weapon;

/// Splash damage dealt at `distance` from a blast whose reach is `reach`.
///
/// Zero at or beyond `reach`, full `damage` at the center, linear in between,
/// rounded to the nearest whole point.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn splash_amount(damage: u32, distance: f32, reach: f32) -> u32 {
    if reach <= 0.0 || distance.is_nan() || distance >= reach {
        return 0;
    }
    let falloff = 1.0 - distance.max(0.0) / reach;
    (damage as f32 * falloff).round() as u32
}

/// Reach of a blast against `player`: blast radius plus the player's
/// approximate radius.
#[must_use]
pub fn splash_reach(weapon: &Weapon, player: &Player) -> f32 {
    weapon.blast_radius + player.hitbox.approximate_radius()
}

/// Apply a weapon's full damage to the player it struck.
pub(crate) fn apply_direct(
    target: &mut Player,
    weapon: &Weapon,
    shooter: PlayerId,
    events: &mut Vec<MatchEvent>,
) -> bool {
    let taken = target.take_damage(weapon.damage);
    if taken == 0 {
        return false;
    }
    events.push(MatchEvent::PlayerHit {
        target: target.id(),
        shooter,
        damage: taken,
        direct: true,
    });
    true
}

/// Apply splash from a blast at `center` to every player in reach.
///
/// `direct_target` is the player already struck by this blast, if any; the
/// policy decides whether they are splashed as well.
pub(crate) fn apply_splash(
    players: &mut [Player],
    center: Vec2,
    weapon: &Weapon,
    direct_target: Option<PlayerId>,
    policy: SplashPolicy,
    shooter: PlayerId,
    events: &mut Vec<MatchEvent>,
) -> bool {
    let mut changed = false;
    for player in players.iter_mut() {
        if policy == SplashPolicy::ExcludeDirectTarget && Some(player.id()) == direct_target {
            continue;
        }
        let amount = splash_amount(
            weapon.damage,
            player.position.distance(center),
            splash_reach(weapon, player),
        );
        let taken = player.take_damage(amount);
        if taken > 0 {
            events.push(MatchEvent::PlayerHit {
                target: player.id(),
                shooter,
                damage: taken,
                direct: false,
            });
            changed = true;
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Hitbox, PlayerSpawn};
    use crate::weapon::{WeaponCatalog, WeaponId};

    fn player(id: u32, x: f32) -> Player {
        let spawn = PlayerSpawn::new(Vec2::new(x, 100.0), 45.0, 50.0, Hitbox::from_size(30.0, 20.0));
        Player::new(PlayerId::new(id), spawn, 100)
    }

    mod amount_tests {
        use super::*;

        #[test]
        fn full_at_center() {
            assert_eq!(splash_amount(25, 0.0, 45.0), 25);
        }

        #[test]
        fn zero_at_and_beyond_reach() {
            assert_eq!(splash_amount(25, 45.0, 45.0), 0);
            assert_eq!(splash_amount(25, 80.0, 45.0), 0);
            assert_eq!(splash_amount(25, f32::NAN, 45.0), 0);
        }

        #[test]
        fn linear_falloff_rounds() {
            // 25 * (1 - 15/45) = 16.67
            assert_eq!(splash_amount(25, 15.0, 45.0), 17);
            // 45 * (1 - 50/65) = 10.38
            assert_eq!(splash_amount(45, 50.0, 65.0), 10);
        }

        #[test]
        fn reach_adds_approximate_radius() {
            let cannon = WeaponCatalog::get(WeaponId::Cannon);
            assert_eq!(splash_reach(cannon, &player(1, 0.0)), 45.0);
        }
    }

    mod splash_tests {
        use super::*;

        #[test]
        fn only_players_in_reach_are_hurt() {
            let cannon = WeaponCatalog::get(WeaponId::Cannon);
            let mut players = vec![player(1, 100.0), player(2, 130.0), player(3, 300.0)];
            let mut events = Vec::new();

            let changed = apply_splash(
                &mut players,
                Vec2::new(100.0, 100.0),
                cannon,
                None,
                SplashPolicy::ExcludeDirectTarget,
                PlayerId::new(1),
                &mut events,
            );

            assert!(changed);
            assert_eq!(players[0].health(), 75);
            assert_eq!(players[1].health(), 100 - splash_amount(25, 30.0, 45.0));
            assert_eq!(players[2].health(), 100);
            assert_eq!(events.len(), 2);
        }

        #[test]
        fn policy_controls_double_application() {
            let cannon = WeaponCatalog::get(WeaponId::Cannon);
            let center = Vec2::new(100.0, 100.0);
            let direct = Some(PlayerId::new(1));

            let mut excluded = vec![player(1, 100.0)];
            let mut events = Vec::new();
            let changed = apply_splash(
                &mut excluded,
                center,
                cannon,
                direct,
                SplashPolicy::ExcludeDirectTarget,
                PlayerId::new(2),
                &mut events,
            );
            assert!(!changed);
            assert_eq!(excluded[0].health(), 100);

            let mut included = vec![player(1, 100.0)];
            apply_splash(
                &mut included,
                center,
                cannon,
                direct,
                SplashPolicy::IncludeDirectTarget,
                PlayerId::new(2),
                &mut events,
            );
            assert_eq!(included[0].health(), 75);
        }

        #[test]
        fn dead_players_emit_nothing() {
            let cannon = WeaponCatalog::get(WeaponId::Cannon);
            let mut players = vec![player(1, 100.0)];
            players[0].take_damage(100);
            let mut events = Vec::new();
            let changed = apply_splash(
                &mut players,
                Vec2::new(100.0, 100.0),
                cannon,
                None,
                SplashPolicy::IncludeDirectTarget,
                PlayerId::new(2),
                &mut events,
            );
            assert!(!changed);
            assert!(events.is_empty());
        }
    }

    #[test]
    fn direct_hit_clamps_at_zero() {
        let mortar = WeaponCatalog::get(WeaponId::Mortar);
        let mut target = player(2, 0.0);
        target.take_damage(80);
        let mut events = Vec::new();
        assert!(apply_direct(&mut target, mortar, PlayerId::new(1), &mut events));
        assert_eq!(target.health(), 0);
        assert_eq!(
            events,
            vec![MatchEvent::PlayerHit {
                target: PlayerId::new(2),
                shooter: PlayerId::new(1),
                damage: 20,
                direct: true,
            }]
        );
    }
}
