//! Time sources and cooldown timers
//!
//! Every time-based effect in the simulation (hunger decay, regeneration,
//! attack and siege gates, growth) compares millisecond timestamps handed in
//! by a [`Clock`]. Frame rate never enters the math, and tests drive time
//! with a [`ManualClock`].

use crate::core::types::Millis;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::time::Instant;

/// Source of the current simulation timestamp
pub trait Clock {
    fn now_ms(&self) -> Millis;
}

/// Monotonic wall clock measured from construction
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> Millis {
        self.origin.elapsed().as_millis() as Millis
    }
}

/// Hand-driven clock for deterministic runs and tests
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self { now: Cell::new(start) }
    }

    pub fn advance(&self, delta: Millis) {
        self.now.set(self.now.get() + delta);
    }

    pub fn set(&self, now: Millis) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> Millis {
        (**self).now_ms()
    }
}

/// Last-fired timestamp plus interval
///
/// A cooldown that has never fired is ready immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooldown {
    pub interval: Millis,
    pub last_fired: Option<Millis>,
}

impl Cooldown {
    pub fn new(interval: Millis) -> Self {
        Self { interval, last_fired: None }
    }

    /// Cooldown whose first window opens `interval` after `now`
    pub fn started_at(interval: Millis, now: Millis) -> Self {
        Self { interval, last_fired: Some(now) }
    }

    pub fn is_ready(&self, now: Millis) -> bool {
        match self.last_fired {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.interval,
        }
    }

    pub fn fire(&mut self, now: Millis) {
        self.last_fired = Some(now);
    }

    /// Fire if ready; returns whether it fired
    pub fn try_fire(&mut self, now: Millis) -> bool {
        if self.is_ready(now) {
            self.fire(now);
            true
        } else {
            false
        }
    }
}
