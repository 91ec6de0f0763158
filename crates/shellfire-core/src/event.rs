//! Match events for audio, rendering, and telemetry subscribers.
//!
//! State transitions never call out to sound or drawing code directly.
//! Instead the engine publishes a [`MatchEvent`] for each discrete thing that
//! happened, and any number of [`EventSink`]s receive the kinds they asked for
//! through an [`EventMask`].
//!
//! # Example
//!
//! ```
//! use shellfire_core::event::{EventBus, EventLog, EventMask, MatchEvent};
//!
//! let mut bus = EventBus::default();
//! let log = EventLog::new();
//! bus.subscribe(EventMask::AUDIO, log.clone());
//!
//! bus.publish(&MatchEvent::WindChanged { speed: 0.3 });
//! bus.publish(&MatchEvent::MatchReset);
//! assert!(log.is_empty()); // neither is an audio cue
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::entity::PlayerId;
use crate::weapon::WeaponId;

bitflags! {
    /// Selects which event kinds a subscriber receives.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct EventMask: u16 {
        /// A projectile was launched
        const SHOT = 1 << 0;
        /// A player took damage
        const HIT = 1 << 1;
        /// A blast was created
        const EXPLOSION = 1 << 2;
        /// A projectile bounced or penetrated without exploding
        const IMPACT = 1 << 3;
        /// A projectile left the playfield
        const PROJECTILE_LOST = 1 << 4;
        /// The turn passed to another player
        const TURN = 1 << 5;
        /// The match ended
        const GAME_OVER = 1 << 6;
        /// Wind changed
        const WIND = 1 << 7;
        /// The match was reset
        const RESET = 1 << 8;

        /// The cues that map to sound effects (shoot, hit, explosion)
        const AUDIO = Self::SHOT.bits() | Self::HIT.bits() | Self::EXPLOSION.bits();
    }
}

/// Something that happened during a state transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// A projectile was launched.
    ShotFired {
        /// Player who fired
        shooter: PlayerId,
        /// Weapon used
        weapon: WeaponId,
        /// Launch point
        position: Vec2,
        /// Launch velocity
        velocity: Vec2,
    },
    /// A player lost health.
    PlayerHit {
        /// Player who was damaged
        target: PlayerId,
        /// Owner of the projectile
        shooter: PlayerId,
        /// Health actually removed
        damage: u32,
        /// True for the hitbox hit, false for splash
        direct: bool,
    },
    /// A blast record was created.
    Explosion {
        /// Blast center
        position: Vec2,
        /// Blast radius
        radius: f32,
        /// True for a cosmetic cluster marker
        cluster: bool,
    },
    /// A bouncing projectile rebounded off terrain.
    ProjectileBounced {
        /// Contact point
        position: Vec2,
        /// Bounces used so far
        bounces: u32,
    },
    /// A penetrating projectile punched through terrain.
    TerrainPenetrated {
        /// Contact point
        position: Vec2,
        /// Penetrations used so far
        penetrations: u32,
    },
    /// The projectile left the playfield without exploding.
    ProjectileLost {
        /// Owner of the projectile
        shooter: PlayerId,
        /// Last in-bounds position
        position: Vec2,
    },
    /// A new player holds the turn.
    TurnChanged {
        /// New turn holder
        player: PlayerId,
    },
    /// The match ended.
    GameOver {
        /// Winner, if any
        winner: Option<PlayerId>,
    },
    /// Wind speed changed.
    WindChanged {
        /// New signed wind speed
        speed: f32,
    },
    /// All players were restored and the match restarted.
    MatchReset,
}

impl MatchEvent {
    /// The mask bit for this event.
    #[must_use]
    pub const fn kind(&self) -> EventMask {
        match self {
            Self::ShotFired { .. } => EventMask::SHOT,
            Self::PlayerHit { .. } => EventMask::HIT,
            Self::Explosion { .. } => EventMask::EXPLOSION,
            Self::ProjectileBounced { .. } | Self::TerrainPenetrated { .. } => EventMask::IMPACT,
            Self::ProjectileLost { .. } => EventMask::PROJECTILE_LOST,
            Self::TurnChanged { .. } => EventMask::TURN,
            Self::GameOver { .. } => EventMask::GAME_OVER,
            Self::WindChanged { .. } => EventMask::WIND,
            Self::MatchReset => EventMask::RESET,
        }
    }
}

/// Receives published events.
pub trait EventSink {
    /// Called once per matching event, in publication order.
    fn on_event(&mut self, event: &MatchEvent);
}

impl<F: FnMut(&MatchEvent)> EventSink for F {
    fn on_event(&mut self, event: &MatchEvent) {
        self(event);
    }
}

/// A sink that records events for later draining.
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<MatchEvent>>>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains and returns all recorded events, oldest first.
    pub fn take_events(&self) -> Vec<MatchEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Number of events currently recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// True if nothing is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl EventSink for EventLog {
    fn on_event(&mut self, event: &MatchEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

/// Fan-out of events to masked subscribers.
#[derive(Default)]
pub struct EventBus {
    sinks: Vec<(EventMask, Box<dyn EventSink>)>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("sinks", &format!("[{} sinks]", self.sinks.len()))
            .finish()
    }
}

impl EventBus {
    /// Register a sink for the kinds in `mask`.
    pub fn subscribe(&mut self, mask: EventMask, sink: impl EventSink + 'static) {
        self.sinks.push((mask, Box::new(sink)));
    }

    /// Deliver `event` to every sink whose mask includes its kind.
    pub fn publish(&mut self, event: &MatchEvent) {
        let kind = event.kind();
        for (mask, sink) in &mut self.sinks {
            if mask.intersects(kind) {
                sink.on_event(event);
            }
        }
    }

    /// Number of registered sinks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// True if nobody is listening.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}
