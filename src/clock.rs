//! Time sources for the animation.
//!
//! [`MovingLogo`](crate::logo::MovingLogo) scales every step by the time elapsed since the
//! previous one, so it needs something it can ask "how long has it been?".

use std::{
    cell::Cell,
    rc::Rc,
    time::{Duration, Instant},
};

/// Measures the time between animation ticks.
pub trait Clock {
    /// Whole milliseconds since the last restart.
    fn elapsed_millis(&self) -> f64;
    /// Starts measuring from now.
    fn restart(&mut self);
}

/// A wall clock backed by [`Instant`].
#[derive(Debug, Clone)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::start()
    }
}

impl Clock for Stopwatch {
    fn elapsed_millis(&self) -> f64 {
        (self.started.elapsed().as_secs_f64() * 1000.0).round()
    }

    fn restart(&mut self) {
        self.started = Instant::now();
    }
}

/// A clock that reports whatever it was last told to.
///
/// Clones share the same value, so a test can keep one handle and move the
/// other into the logo. Restarting does not reset the value: every tick sees
/// the same elapsed time until it is changed.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    elapsed: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed: Rc::new(Cell::new(elapsed)),
        }
    }

    pub fn set(&self, elapsed: Duration) {
        self.elapsed.set(elapsed);
    }
}

impl Clock for ManualClock {
    fn elapsed_millis(&self) -> f64 {
        self.elapsed.get().as_millis() as f64
    }

    fn restart(&mut self) {}
}
