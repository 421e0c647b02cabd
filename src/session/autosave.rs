//! Autosave schedule
//!
//! A fixed-interval schedule polled by the owner of the session. Nothing
//! runs in the background: the front end calls [`Session::tick`] from its
//! own loop and the save happens on that thread.
//!
//! [`Session::tick`]: crate::session::Session::tick

use std::time::{Duration, Instant};

/// Fixed-interval autosave schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Autosave {
    interval: Duration,
    last_run: Instant,
}

impl Autosave {
    /// Start a schedule whose first run is due `interval` after `now`
    ///
    /// A zero interval disables autosave.
    #[must_use]
    pub const fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_run: now,
        }
    }

    /// Interval between runs
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether autosave is switched on
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        !self.interval.is_zero()
    }

    /// Whether a run is due at `now`
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.is_enabled() && now.saturating_duration_since(self.last_run) >= self.interval
    }

    /// When the next run becomes due
    #[must_use]
    pub fn next_due(&self) -> Option<Instant> {
        self.is_enabled().then(|| self.last_run + self.interval)
    }

    /// Record a run at `now`
    pub fn mark_run(&mut self, now: Instant) {
        self.last_run = now;
    }
}
