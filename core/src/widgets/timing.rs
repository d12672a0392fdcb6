//! Debounce and throttle gates for high-frequency events (scroll, resize).

use std::time::{Duration, Instant};

pub const DEFAULT_WAIT: Duration = Duration::from_millis(100);

/// Fires once, `wait` after the last call.
#[derive(Debug, Clone, Copy)]
pub struct Debounce {
    wait: Duration,
    deadline: Option<Instant>,
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(DEFAULT_WAIT)
    }
}

impl Debounce {
    #[must_use]
    pub const fn new(wait: Duration) -> Self {
        Self {
            wait,
            deadline: None,
        }
    }

    /// Record a call; restarts the wait.
    pub fn call(&mut self, now: Instant) {
        self.deadline = Some(now + self.wait);
    }

    /// True exactly once when the wait has elapsed since the last call.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

/// Lets one call through per `limit` window; calls inside the window are dropped.
#[derive(Debug, Clone, Copy)]
pub struct Throttle {
    limit: Duration,
    open_at: Option<Instant>,
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(DEFAULT_WAIT)
    }
}

impl Throttle {
    #[must_use]
    pub const fn new(limit: Duration) -> Self {
        Self {
            limit,
            open_at: None,
        }
    }

    /// Returns true when the call should run.
    pub fn try_call(&mut self, now: Instant) -> bool {
        if self.open_at.is_some_and(|open_at| now < open_at) {
            return false;
        }
        self.open_at = Some(now + self.limit);
        true
    }
}
