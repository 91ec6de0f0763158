//! Match setup and flight utilities shared by the match-level tests.

use glam::Vec2;
use relief::TerrainConfig;

use crate::clock::ManualClock;
use crate::config::EngineConfig;
use crate::engine::{Engine, FlightTick};
use crate::entity::{Hitbox, PlayerId, PlayerSpawn, Projectile};
use crate::resolver::Impact;
use crate::weapon::WeaponId;

/// Playfield width used by every helper match.
pub const WIDTH: usize = 800;
/// Playfield height used by every helper match.
pub const HEIGHT: f32 = 600.0;
/// Surface y of the flat helper terrain.
pub const FLAT_SURFACE: f32 = 500.0;

/// First player of every helper match.
pub const P1: PlayerId = PlayerId::new(1);
/// Second player of every helper match.
pub const P2: PlayerId = PlayerId::new(2);

/// Give up on a flight after this many ticks.
const MAX_FLIGHT_TICKS: usize = 2_000;

// =============================================================================
// Logging
// =============================================================================

/// Route `tracing` output to the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Match Setup
// =============================================================================

/// Standard 30x20 hitbox.
#[must_use]
pub fn hitbox() -> Hitbox {
    Hitbox::from_size(30.0, 20.0)
}

/// An engine on an 800x600 field driven by a manual clock.
pub fn engine_with(config: EngineConfig) -> (Engine, ManualClock) {
    init_tracing();
    let clock = ManualClock::new();
    let mut engine = Engine::with_clock(config, clock.clone()).unwrap();
    engine.initialize_terrain(WIDTH, HEIGHT).unwrap();
    (engine, clock)
}

/// Two players at the usual duel defaults on rolling hills: player 1 at
/// angle 45 on the left, player 2 at angle 135 on the right, both power 50.
///
/// Players are dropped from the sky and settled onto the ground.
pub fn standard_match() -> (Engine, ManualClock) {
    let (mut engine, clock) = engine_with(EngineConfig::default());
    engine
        .add_player(P1, PlayerSpawn::new(Vec2::new(100.0, 300.0), 45.0, 50.0, hitbox()))
        .unwrap();
    engine
        .add_player(P2, PlayerSpawn::new(Vec2::new(700.0, 300.0), 135.0, 50.0, hitbox()))
        .unwrap();
    settle_players(&mut engine);
    (engine, clock)
}

/// A match on perfectly flat ground (surface at y = 500) with players resting
/// at the given x positions, ids 1, 2, 3, ...
pub fn flat_match(xs: &[f32]) -> (Engine, ManualClock) {
    let config = EngineConfig {
        terrain: TerrainConfig::flat(),
        ..EngineConfig::default()
    };
    let (mut engine, clock) = engine_with(config);
    for (id, x) in (1..).zip(xs) {
        let spawn = PlayerSpawn::new(Vec2::new(*x, FLAT_SURFACE - 10.0), 45.0, 50.0, hitbox());
        engine.add_player(PlayerId::new(id), spawn).unwrap();
    }
    engine.set_wind_speed(0.0);
    settle_players(&mut engine);
    (engine, clock)
}

/// Run player physics until everybody is grounded.
pub fn settle_players(engine: &mut Engine) {
    for _ in 0..500 {
        engine.tick_all_player_physics();
        if engine.players().iter().all(|p| p.grounded) {
            return;
        }
    }
    panic!("players never settled");
}

// =============================================================================
// Flight
// =============================================================================

/// Put an armed shell owned by `owner` directly into flight.
pub fn place_shell(
    engine: &mut Engine,
    owner: PlayerId,
    weapon: WeaponId,
    position: Vec2,
    velocity: Vec2,
) {
    let mut shell = Projectile::launch(owner, weapon, position, velocity);
    shell.armed = true;
    engine.state_mut().projectile = Some(shell);
}

/// Tick the projectile until it is gone, returning every non-`Clear` result.
pub fn fly_to_end(engine: &mut Engine) -> Vec<FlightTick> {
    let mut notable = Vec::new();
    for _ in 0..MAX_FLIGHT_TICKS {
        match engine.tick_projectile_physics() {
            FlightTick::Idle => return notable,
            FlightTick::Moved(Impact::Clear) => {}
            other => notable.push(other),
        }
    }
    panic!("projectile still flying after {MAX_FLIGHT_TICKS} ticks");
}

/// Set a player's health by dealing the difference as damage.
pub fn set_health(engine: &mut Engine, id: PlayerId, health: u32) {
    let player = engine.state_mut().player_mut(id).unwrap();
    let excess = player.health().saturating_sub(health);
    player.take_damage(excess);
}
