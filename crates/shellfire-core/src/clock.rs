//! Time sources for weapon reload gating.
//!
//! The engine never schedules anything; the only place it needs a notion of
//! real time is the reload rule ("a player may not fire again until the
//! weapon's reload time has elapsed"). The host picks the source.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Instant;

/// A monotonic time source in seconds.
pub trait Clock {
    /// Seconds since an arbitrary fixed origin.
    fn now(&self) -> f64;
}

/// Wall-clock time measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Start measuring from now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// A clock advanced explicitly by its owner.
///
/// Clones share the same reading, so a host can hand one clone to the engine
/// and keep another to move time forward.
///
/// ```
/// use shellfire_core::clock::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let engine_side = clock.clone();
/// clock.advance(1.5);
/// assert_eq!(engine_side.now(), 1.5);
/// ```
#[derive(Clone, Default)]
pub struct ManualClock {
    seconds: Rc<Cell<f64>>,
}

impl ManualClock {
    /// A clock reading zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `seconds`.
    pub fn advance(&self, seconds: f64) {
        self.seconds.set(self.seconds.get() + seconds);
    }

    /// Jump to an absolute reading.
    pub fn set(&self, seconds: f64) {
        self.seconds.set(seconds);
    }
}

impl fmt::Debug for ManualClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualClock")
            .field("seconds", &self.seconds.get())
            .finish()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.seconds.get()
    }
}
