//! The turn controller.
//!
//! [`Engine`] owns the [`MatchState`] and is the only writer to it. A host
//! loop drives it with discrete operations:
//!
//! - **Setup**: [`initialize_terrain`](Engine::initialize_terrain),
//!   [`add_player`](Engine::add_player)
//! - **Player input**: aim, power, movement, weapon selection, [`shoot`](Engine::shoot)
//! - **Ticks**: player physics, projectile physics, explosion frames
//! - **Match control**: wind and [`reset_game`](Engine::reset_game)
//!
//! # Ticks
//!
//! One tick is the unit of simulation. No operation looks at elapsed real
//! time except the reload gate, which reads the injected [`Clock`]. The host
//! picks how many ticks to run per rendered frame.
//!
//! # Rejected input
//!
//! Player-driven operations return `bool` ("was it applied") and never fail.
//! An unknown id, a shot during another player's turn, or any input after the
//! match ended is simply ignored.
//!
//! # Example
//!
//! ```
//! use shellfire_core::{Engine, EngineConfig, FlightTick};
//! use shellfire_core::entity::{Hitbox, PlayerId, PlayerSpawn};
//! use glam::Vec2;
//!
//! let mut engine = Engine::new(EngineConfig::default())?;
//! engine.initialize_terrain(800, 600.0)?;
//!
//! let hitbox = Hitbox::from_size(30.0, 20.0);
//! let p1 = PlayerId::new(1);
//! let p2 = PlayerId::new(2);
//! engine.add_player(p1, PlayerSpawn::new(Vec2::new(100.0, 400.0), 45.0, 50.0, hitbox))?;
//! engine.add_player(p2, PlayerSpawn::new(Vec2::new(700.0, 400.0), 135.0, 50.0, hitbox))?;
//!
//! assert!(engine.shoot(p1));
//! while engine.tick_projectile_physics() != FlightTick::Idle {}
//! assert_eq!(engine.current_turn(), Some(p2));
//! # Ok::<(), shellfire_core::EngineError>(())
//! ```

use std::fmt;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use relief::TerrainField;
use tracing::{debug, info, trace};

use crate::ballistics::{
    aim_angle, apply_move, launch_velocity, step_player, step_projectile, ProjectileStep,
};
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::entity::{Direction, Player, PlayerId, PlayerSpawn, Projectile};
use crate::error::EngineError;
use crate::event::{EventBus, EventMask, EventSink, MatchEvent};
use crate::explosion::ExplosionTracker;
use crate::resolver::{CollisionResolver, Impact};
use crate::state::{MatchState, TurnPhase};
use crate::weapon::{WeaponCatalog, WeaponId};

// =============================================================================
// FlightTick
// =============================================================================

/// Result of one projectile tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightTick {
    /// Nothing in flight, or the match is over
    Idle,
    /// The shell left the playfield; the turn passed without damage
    OutOfBounds,
    /// The shell moved and was resolved against players and terrain
    Moved(Impact),
}

// =============================================================================
// Engine
// =============================================================================

/// The artillery duel engine.
pub struct Engine {
    config: EngineConfig,
    state: MatchState,
    resolver: CollisionResolver,
    rng: ChaCha8Rng,
    clock: Box<dyn Clock>,
    events: EventBus,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("clock", &self.clock.now())
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Creates an engine reading reload time from the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if the configuration is invalid.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Self::with_clock(config, SystemClock::new())
    }

    /// Creates an engine with a host-provided clock.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if the configuration is invalid.
    pub fn with_clock(config: EngineConfig, clock: impl Clock + 'static) -> Result<Self, EngineError> {
        config.validate()?;
        debug!(seed = config.seed, "engine created");
        Ok(Self {
            resolver: CollisionResolver::new(config.combat.clone()),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            state: MatchState::default(),
            clock: Box::new(clock),
            events: EventBus::default(),
            config,
        })
    }

    /// Register a subscriber for the event kinds in `mask`.
    pub fn subscribe(&mut self, mask: EventMask, sink: impl EventSink + 'static) {
        self.events.subscribe(mask, sink);
    }

    // =========================================================================
    // Setup
    // =========================================================================

    /// Generate terrain for a `width` x `height` playfield.
    ///
    /// Replaces any existing terrain.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Terrain`] if the dimensions are unusable.
    pub fn initialize_terrain(&mut self, width: usize, height: f32) -> Result<(), EngineError> {
        let terrain = TerrainField::generate_with(width, height, self.config.terrain.clone())?;
        debug!(width, height, "terrain initialized");
        self.state.terrain = Some(terrain);
        Ok(())
    }

    /// Add a combatant at full health.
    ///
    /// The first player added holds the first turn.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DuplicatePlayer`] if `id` is taken, or
    /// [`EngineError::InvalidSpawn`] for a non-finite position or an empty
    /// hitbox.
    pub fn add_player(&mut self, id: PlayerId, spawn: PlayerSpawn) -> Result<(), EngineError> {
        if self.state.player(id).is_some() {
            return Err(EngineError::DuplicatePlayer(id));
        }
        if !spawn.position.is_finite() {
            return Err(EngineError::InvalidSpawn {
                id,
                reason: "position must be finite",
            });
        }
        let half = spawn.hitbox.half_extents;
        if !half.is_finite() || half.x <= 0.0 || half.y <= 0.0 {
            return Err(EngineError::InvalidSpawn {
                id,
                reason: "hitbox must have positive size",
            });
        }

        self.state
            .players
            .push(Player::new(id, spawn, self.config.combat.max_health));
        debug!(player = %id, x = spawn.position.x, y = spawn.position.y, "player added");

        if self.state.current_turn.is_none() {
            self.state.current_turn = Some(id);
            self.events.publish(&MatchEvent::TurnChanged { player: id });
        }
        Ok(())
    }

    // =========================================================================
    // Player input
    // =========================================================================

    /// Set a player's aim, clamped to the valid range.
    pub fn set_angle(&mut self, id: PlayerId, angle: f32) -> bool {
        self.with_player(id, |player| player.set_angle(angle))
    }

    /// Nudge a player's aim by `delta` degrees.
    pub fn adjust_angle(&mut self, id: PlayerId, delta: f32) -> bool {
        self.with_player(id, |player| player.set_angle(player.angle() + delta))
    }

    /// Nudge a player's power by `delta`.
    pub fn adjust_power(&mut self, id: PlayerId, delta: f32) -> bool {
        self.with_player(id, |player| player.set_power(player.power() + delta))
    }

    /// Aim a player at a world-space point.
    pub fn aim_at(&mut self, id: PlayerId, target: Vec2) -> bool {
        self.with_player(id, |player| player.set_angle(aim_angle(player.position, target)))
    }

    /// Select a weapon the player has unlocked.
    pub fn switch_weapon(&mut self, id: PlayerId, weapon: WeaponId) -> bool {
        if self.state.game_over {
            return false;
        }
        self.state
            .player_mut(id)
            .is_some_and(|player| player.select_weapon(weapon))
    }

    /// Start walking. Only grounded players can be steered.
    pub fn move_player(&mut self, id: PlayerId, direction: Direction) -> bool {
        if self.state.game_over {
            return false;
        }
        let physics = &self.config.physics;
        self.state
            .player_mut(id)
            .is_some_and(|player| apply_move(player, direction, physics))
    }

    /// Stop a walking player when the key for `direction` is released.
    ///
    /// Only zeroes horizontal velocity if the player is moving that way.
    pub fn stop_player(&mut self, id: PlayerId, direction: Direction) -> bool {
        if self.state.game_over {
            return false;
        }
        match self.state.player_mut(id) {
            Some(player) if player.velocity.x * direction.sign() > 0.0 => {
                player.velocity.x = 0.0;
                true
            }
            _ => false,
        }
    }

    /// Seconds until `id`'s selected weapon has reloaded, zero when ready.
    ///
    /// `None` for an unknown player.
    #[must_use]
    pub fn reload_remaining(&self, id: PlayerId) -> Option<f64> {
        let player = self.state.player(id)?;
        let reload = WeaponCatalog::get(player.weapon()).reload_seconds;
        let remaining = player
            .since_last_shot(self.clock.now())
            .map_or(0.0, |elapsed| reload - elapsed);
        Some(remaining.max(0.0))
    }

    /// True if [`shoot`](Self::shoot) would fire for `id` right now.
    ///
    /// Requires that `id` is alive and holds the turn, nothing is in flight,
    /// the match is running, and the selected weapon has reloaded.
    #[must_use]
    pub fn can_fire(&self, id: PlayerId) -> bool {
        !self.state.game_over
            && self.state.projectile.is_none()
            && self.state.current_turn == Some(id)
            && self.state.player(id).is_some_and(Player::is_alive)
            && self.reload_remaining(id).is_some_and(|left| left <= 0.0)
    }

    /// Fire the current turn holder's selected weapon.
    ///
    /// Ignored unless [`can_fire`](Self::can_fire) holds.
    pub fn shoot(&mut self, id: PlayerId) -> bool {
        if !self.can_fire(id) {
            trace!(
                player = %id,
                phase = ?self.state.phase(),
                reload = ?self.reload_remaining(id),
                "shot ignored"
            );
            return false;
        }

        let now = self.clock.now();
        let physics = &self.config.physics;
        let Some(player) = self.state.player_mut(id) else {
            return false;
        };
        let weapon = WeaponCatalog::get(player.weapon());

        let velocity = launch_velocity(
            player.angle(),
            player.power(),
            weapon.velocity_multiplier,
            physics,
        );
        let position = player.position;
        player.last_shot_at = Some(now);
        self.state.projectile = Some(Projectile::launch(id, weapon.id, position, velocity));

        debug!(
            player = %id,
            weapon = %weapon.id,
            vx = velocity.x,
            vy = velocity.y,
            "shot fired"
        );
        self.events.publish(&MatchEvent::ShotFired {
            shooter: id,
            weapon: weapon.id,
            position,
            velocity,
        });
        true
    }

    // =========================================================================
    // Ticks
    // =========================================================================

    /// Advance one player's kinematics by one tick.
    ///
    /// Does nothing until terrain exists.
    pub fn tick_player_physics(&mut self, id: PlayerId) -> bool {
        let Some(terrain) = self.state.terrain.as_ref() else {
            return false;
        };
        let Some(player) = self.state.players.iter_mut().find(|p| p.id() == id) else {
            return false;
        };
        let motion = step_player(player, terrain, &self.config.physics);
        player.position = motion.position;
        player.velocity = motion.velocity;
        player.grounded = motion.grounded;
        true
    }

    /// Advance every player by one tick, in creation order.
    pub fn tick_all_player_physics(&mut self) {
        let Some(terrain) = self.state.terrain.as_ref() else {
            return;
        };
        for player in &mut self.state.players {
            let motion = step_player(player, terrain, &self.config.physics);
            player.position = motion.position;
            player.velocity = motion.velocity;
            player.grounded = motion.grounded;
        }
    }

    /// Advance the projectile by one tick and resolve what it touched.
    ///
    /// A shell leaving the playfield, or exploding, passes the turn to the
    /// next living player unless the match just ended.
    pub fn tick_projectile_physics(&mut self) -> FlightTick {
        if self.state.game_over {
            return FlightTick::Idle;
        }
        let Some(projectile) = self.state.projectile.as_ref() else {
            return FlightTick::Idle;
        };

        let step = match self.state.playfield() {
            Some(playfield) => step_projectile(
                projectile,
                self.state.wind_speed,
                playfield,
                &self.config.physics,
            ),
            None => ProjectileStep::OutOfBounds,
        };

        match step {
            ProjectileStep::OutOfBounds => {
                let (shooter, position) = (projectile.owner, projectile.position);
                self.state.projectile = None;
                debug!(shooter = %shooter, x = position.x, y = position.y, "projectile lost");
                self.events
                    .publish(&MatchEvent::ProjectileLost { shooter, position });
                self.advance_turn();
                FlightTick::OutOfBounds
            }
            ProjectileStep::Moved { position, velocity } => {
                if let Some(projectile) = self.state.projectile.as_mut() {
                    projectile.position = position;
                    projectile.velocity = velocity;
                }
                let impact = self.resolve_contact();
                FlightTick::Moved(impact)
            }
        }
    }

    /// Advance every explosion animation by one frame.
    ///
    /// Returns how many finished.
    pub fn tick_explosions(&mut self) -> usize {
        self.state.explosions.advance()
    }

    // =========================================================================
    // Match control
    // =========================================================================

    /// Set the wind directly.
    ///
    /// Non-finite speeds are ignored.
    pub fn set_wind_speed(&mut self, speed: f32) -> bool {
        if !speed.is_finite() {
            trace!(speed, "wind ignored");
            return false;
        }
        self.state.wind_speed = speed;
        trace!(speed, "wind set");
        self.events.publish(&MatchEvent::WindChanged { speed });
        true
    }

    /// Roll a new wind from the engine's RNG.
    ///
    /// Returns the new speed, or `None` once the match is over.
    pub fn randomize_wind(&mut self) -> Option<f32> {
        if self.state.game_over {
            return None;
        }
        let speed = self.roll_wind();
        self.set_wind_speed(speed);
        Some(speed)
    }

    /// Start the match over.
    ///
    /// Every player returns to their spawn at full health, the shell and all
    /// explosions are cleared, wind is re-rolled, terrain is regenerated, and
    /// the first player holds the turn.
    pub fn reset_game(&mut self) {
        let max_health = self.config.combat.max_health;
        for player in &mut self.state.players {
            player.reset(max_health);
        }
        self.state.projectile = None;
        self.state.explosions.clear();
        self.state.game_over = false;
        self.state.winner = None;
        self.state.current_turn = self.state.players.first().map(Player::id);
        if let Some(terrain) = self.state.terrain.as_mut() {
            terrain.regenerate();
        }
        let speed = self.roll_wind();
        self.state.wind_speed = speed;

        info!(players = self.state.players.len(), wind = speed, "match reset");
        self.events.publish(&MatchEvent::MatchReset);
        self.events.publish(&MatchEvent::WindChanged { speed });
        if let Some(player) = self.state.current_turn {
            self.events.publish(&MatchEvent::TurnChanged { player });
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Full match state.
    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut MatchState {
        &mut self.state
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// All players in creation order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        self.state.players()
    }

    /// Look up a player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.state.player(id)
    }

    /// Player whose turn it is.
    #[must_use]
    pub fn current_turn(&self) -> Option<PlayerId> {
        self.state.current_turn()
    }

    /// The shell in flight, if any.
    #[must_use]
    pub fn projectile(&self) -> Option<&Projectile> {
        self.state.projectile()
    }

    /// True iff a projectile exists.
    #[must_use]
    pub fn is_projectile_in_motion(&self) -> bool {
        self.state.is_projectile_in_motion()
    }

    /// The terrain, once initialized.
    #[must_use]
    pub fn terrain(&self) -> Option<&TerrainField> {
        self.state.terrain()
    }

    /// Live explosions.
    #[must_use]
    pub fn explosions(&self) -> &ExplosionTracker {
        self.state.explosions()
    }

    /// True once the match has ended.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Winner of a finished match.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.state.winner()
    }

    /// Signed wind speed.
    #[must_use]
    pub fn wind_speed(&self) -> f32 {
        self.state.wind_speed()
    }

    /// Coarse turn-state.
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.state.phase()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Apply `edit` to a player unless the match is over.
    fn with_player(&mut self, id: PlayerId, edit: impl FnOnce(&mut Player)) -> bool {
        if self.state.game_over {
            return false;
        }
        match self.state.player_mut(id) {
            Some(player) => {
                edit(player);
                true
            }
            None => false,
        }
    }

    fn resolve_contact(&mut self) -> Impact {
        let mut events = Vec::new();
        let impact = self.resolver.resolve(&mut self.state, &mut events);
        for event in &events {
            self.events.publish(event);
        }

        if let Impact::Detonated { ended, .. } = impact {
            self.state.projectile = None;
            if ended {
                let winner = self.state.winner;
                info!(winner = ?winner, "game over");
                self.events.publish(&MatchEvent::GameOver { winner });
            } else {
                self.advance_turn();
            }
        }
        impact
    }

    /// Pass the turn to the next living player after the current holder.
    fn advance_turn(&mut self) {
        let Some(current) = self.state.current_turn else {
            return;
        };
        if let Some(next) = self.state.next_living_after(current) {
            self.state.current_turn = Some(next);
            debug!(from = %current, to = %next, "turn advanced");
            self.events.publish(&MatchEvent::TurnChanged { player: next });
        }
    }

    fn roll_wind(&mut self) -> f32 {
        let max = self.config.wind.max_speed;
        if max > 0.0 {
            self.rng.gen_range(-max..max)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::entity::Hitbox;
    use crate::event::EventLog;

    fn engine() -> (Engine, ManualClock) {
        let clock = ManualClock::new();
        let mut engine = Engine::with_clock(EngineConfig::default(), clock.clone()).unwrap();
        engine.initialize_terrain(800, 600.0).unwrap();
        let hitbox = Hitbox::from_size(30.0, 20.0);
        engine
            .add_player(
                PlayerId::new(1),
                PlayerSpawn::new(Vec2::new(100.0, 400.0), 45.0, 50.0, hitbox),
            )
            .unwrap();
        engine
            .add_player(
                PlayerId::new(2),
                PlayerSpawn::new(Vec2::new(700.0, 400.0), 135.0, 50.0, hitbox),
            )
            .unwrap();
        (engine, clock)
    }

    mod setup_tests {
        use super::*;

        #[test]
        fn first_player_holds_turn() {
            let (engine, _) = engine();
            assert_eq!(engine.current_turn(), Some(PlayerId::new(1)));
            assert_eq!(engine.phase(), TurnPhase::AwaitingShot(PlayerId::new(1)));
        }

        #[test]
        fn duplicate_player_rejected() {
            let (mut engine, _) = engine();
            let spawn = PlayerSpawn::new(Vec2::ZERO, 45.0, 50.0, Hitbox::from_size(1.0, 1.0));
            assert_eq!(
                engine.add_player(PlayerId::new(1), spawn),
                Err(EngineError::DuplicatePlayer(PlayerId::new(1)))
            );
        }

        #[test]
        fn invalid_spawns_rejected() {
            let (mut engine, _) = engine();
            let bad_position =
                PlayerSpawn::new(Vec2::new(f32::NAN, 0.0), 45.0, 50.0, Hitbox::from_size(1.0, 1.0));
            assert!(matches!(
                engine.add_player(PlayerId::new(3), bad_position),
                Err(EngineError::InvalidSpawn { .. })
            ));
            let empty_box = PlayerSpawn::new(Vec2::ZERO, 45.0, 50.0, Hitbox::from_size(0.0, 5.0));
            assert!(matches!(
                engine.add_player(PlayerId::new(3), empty_box),
                Err(EngineError::InvalidSpawn { .. })
            ));
            assert_eq!(engine.players().len(), 2);
        }

        #[test]
        fn invalid_config_rejected() {
            let mut config = EngineConfig::default();
            config.combat.explosion_frames = 0;
            assert!(matches!(
                Engine::new(config),
                Err(EngineError::Config(_))
            ));
        }

        #[test]
        fn invalid_terrain_rejected() {
            let mut engine = Engine::new(EngineConfig::default()).unwrap();
            assert!(matches!(
                engine.initialize_terrain(0, 600.0),
                Err(EngineError::Terrain(_))
            ));
            assert!(engine.terrain().is_none());
        }
    }

    mod input_tests {
        use super::*;

        #[test]
        fn unknown_player_is_noop() {
            let (mut engine, _) = engine();
            let ghost = PlayerId::new(9);
            assert!(!engine.set_angle(ghost, 10.0));
            assert!(!engine.adjust_power(ghost, 10.0));
            assert!(!engine.switch_weapon(ghost, WeaponId::Rocket));
            assert!(!engine.move_player(ghost, Direction::Left));
            assert!(!engine.shoot(ghost));
            assert!(!engine.tick_player_physics(ghost));
        }

        #[test]
        fn adjustments_clamp() {
            let (mut engine, _) = engine();
            let p1 = PlayerId::new(1);
            assert!(engine.adjust_angle(p1, 500.0));
            assert_eq!(engine.player(p1).unwrap().angle(), 180.0);
            assert!(engine.adjust_power(p1, -500.0));
            assert_eq!(engine.player(p1).unwrap().power(), 10.0);
        }

        #[test]
        fn aim_at_points_toward_target() {
            let (mut engine, _) = engine();
            let p1 = PlayerId::new(1);
            assert!(engine.aim_at(p1, Vec2::new(100.0, 300.0)));
            assert!((engine.player(p1).unwrap().angle() - 90.0).abs() < 1e-4);
        }

        #[test]
        fn only_turn_holder_may_shoot() {
            let (mut engine, _) = engine();
            assert!(!engine.shoot(PlayerId::new(2)));
            assert!(engine.projectile().is_none());
            assert!(engine.shoot(PlayerId::new(1)));
            assert!(engine.is_projectile_in_motion());
        }

        #[test]
        fn reload_gates_next_shot() {
            let (mut engine, clock) = engine();
            let p1 = PlayerId::new(1);
            assert!(engine.shoot(p1));
            engine.state.projectile = None;

            clock.advance(0.5);
            assert!(!engine.shoot(p1));
            clock.advance(0.5);
            assert!(engine.shoot(p1));
        }

        #[test]
        fn reload_queries_track_clock() {
            let (mut engine, clock) = engine();
            let p1 = PlayerId::new(1);
            assert_eq!(engine.reload_remaining(p1), Some(0.0));
            assert!(engine.can_fire(p1));
            assert!(!engine.can_fire(PlayerId::new(2)));
            assert_eq!(engine.reload_remaining(PlayerId::new(9)), None);

            engine.switch_weapon(p1, WeaponId::Mortar);
            assert!(engine.shoot(p1));
            engine.state.projectile = None;
            assert!(!engine.can_fire(p1));

            clock.advance(1.0);
            assert_eq!(engine.reload_remaining(p1), Some(2.0));
            assert!(!engine.shoot(p1));
            clock.advance(2.0);
            assert_eq!(engine.reload_remaining(p1), Some(0.0));
            assert!(engine.can_fire(p1));
            assert!(engine.shoot(p1));
        }

        #[test]
        fn release_stops_matching_direction_only() {
            let (mut engine, _) = engine();
            let p1 = PlayerId::new(1);
            for _ in 0..200 {
                engine.tick_all_player_physics();
            }
            assert!(engine.move_player(p1, Direction::Right));

            assert!(!engine.stop_player(p1, Direction::Left));
            assert_eq!(engine.player(p1).unwrap().velocity.x, 3.0);

            assert!(engine.stop_player(p1, Direction::Right));
            assert_eq!(engine.player(p1).unwrap().velocity.x, 0.0);
            assert!(!engine.stop_player(p1, Direction::Right));
            assert!(!engine.stop_player(PlayerId::new(9), Direction::Left));
        }

        #[test]
        fn move_requires_ground() {
            let (mut engine, _) = engine();
            let p1 = PlayerId::new(1);
            assert!(!engine.move_player(p1, Direction::Right));
            for _ in 0..200 {
                engine.tick_all_player_physics();
            }
            assert!(engine.player(p1).unwrap().grounded);
            assert!(engine.move_player(p1, Direction::Right));
            assert_eq!(engine.player(p1).unwrap().velocity.x, 3.0);
        }
    }

    mod flight_tests {
        use super::*;

        #[test]
        fn lost_shell_passes_turn() {
            let (mut engine, _) = engine();
            let log = EventLog::new();
            engine.subscribe(EventMask::PROJECTILE_LOST | EventMask::TURN, log.clone());

            engine.set_angle(PlayerId::new(1), 90.0);
            engine.adjust_power(PlayerId::new(1), 50.0);
            engine.state.projectile = Some(Projectile::launch(
                PlayerId::new(1),
                WeaponId::Cannon,
                Vec2::new(10.0, 100.0),
                Vec2::new(-20.0, 0.0),
            ));

            assert_eq!(engine.tick_projectile_physics(), FlightTick::OutOfBounds);
            assert!(engine.projectile().is_none());
            assert_eq!(engine.current_turn(), Some(PlayerId::new(2)));
            assert_eq!(log.len(), 2);
            assert_eq!(engine.tick_projectile_physics(), FlightTick::Idle);
        }

        #[test]
        fn no_terrain_means_out_of_bounds() {
            let mut engine = Engine::new(EngineConfig::default()).unwrap();
            let hitbox = Hitbox::from_size(30.0, 20.0);
            engine
                .add_player(PlayerId::new(1), PlayerSpawn::new(Vec2::ZERO, 45.0, 50.0, hitbox))
                .unwrap();
            assert!(engine.shoot(PlayerId::new(1)));
            assert_eq!(engine.tick_projectile_physics(), FlightTick::OutOfBounds);
            assert!(!engine.tick_player_physics(PlayerId::new(1)));
        }

        #[test]
        fn explosions_tick_down() {
            let (mut engine, _) = engine();
            engine.state.explosions.push(crate::explosion::Explosion::new(Vec2::ZERO, 10.0, 2));
            assert_eq!(engine.tick_explosions(), 0);
            assert_eq!(engine.tick_explosions(), 1);
            assert!(engine.explosions().is_empty());
        }
    }

    mod control_tests {
        use super::*;

        #[test]
        fn game_over_freezes_input() {
            let (mut engine, _) = engine();
            engine.state.game_over = true;
            engine.state.winner = Some(PlayerId::new(1));
            let p1 = PlayerId::new(1);
            assert!(!engine.shoot(p1));
            assert!(!engine.set_angle(p1, 10.0));
            assert!(!engine.adjust_power(p1, 10.0));
            assert!(!engine.switch_weapon(p1, WeaponId::Mortar));
            assert!(!engine.stop_player(p1, Direction::Left));
            assert!(!engine.can_fire(p1));
            assert!(engine.randomize_wind().is_none());
            assert_eq!(engine.player(p1).unwrap().weapon(), WeaponId::Cannon);
        }

        #[test]
        fn non_finite_wind_ignored() {
            let (mut engine, _) = engine();
            let winds = EventLog::new();
            engine.subscribe(EventMask::WIND, winds.clone());

            assert!(engine.set_wind_speed(0.5));
            assert!(!engine.set_wind_speed(f32::NAN));
            assert!(!engine.set_wind_speed(f32::NEG_INFINITY));

            assert_eq!(engine.wind_speed(), 0.5);
            assert_eq!(winds.len(), 1);
        }

        #[test]
        fn wind_rolls_stay_in_bounds() {
            let (mut engine, _) = engine();
            for _ in 0..100 {
                let speed = engine.randomize_wind().unwrap();
                assert!((-1.0..1.0).contains(&speed));
                assert_eq!(engine.wind_speed(), speed);
            }
        }

        #[test]
        fn reset_restores_everything() {
            let (mut engine, _) = engine();
            let p1 = PlayerId::new(1);
            let p2 = PlayerId::new(2);
            let fresh_terrain = engine.terrain().unwrap().clone();

            engine.switch_weapon(p1, WeaponId::Grenade);
            engine.set_angle(p1, 10.0);
            engine.shoot(p1);
            engine.state.players[1].take_damage(100);
            engine.state.current_turn = Some(p2);
            engine.state.game_over = true;
            engine.state.winner = Some(p1);
            engine
                .state
                .terrain
                .as_mut()
                .unwrap()
                .deform(Vec2::new(400.0, 500.0), 60.0);
            engine.state.explosions.push(crate::explosion::Explosion::new(Vec2::ZERO, 1.0, 20));

            engine.reset_game();

            assert!(!engine.is_game_over());
            assert_eq!(engine.winner(), None);
            assert_eq!(engine.current_turn(), Some(p1));
            assert!(engine.projectile().is_none());
            assert!(engine.explosions().is_empty());
            assert_eq!(engine.terrain(), Some(&fresh_terrain));
            let player = engine.player(p1).unwrap();
            assert_eq!(player.health(), 100);
            assert_eq!(player.angle(), 45.0);
            assert_eq!(player.weapon(), WeaponId::Cannon);
            assert_eq!(player.last_shot_at, None);
            assert_eq!(engine.player(p2).unwrap().health(), 100);
        }
    }
}
