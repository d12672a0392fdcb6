//! Animated statistic counters (`data-count`).

use std::time::{Duration, Instant};

pub const COUNTER_DURATION: Duration = Duration::from_millis(2000);

#[must_use]
pub fn ease_out_cubic(progress: f64) -> f64 {
    1.0 - (1.0 - progress).powi(3)
}

/// Integer prefix of a `data-count` attribute (`"250+"` reads as 250).
#[must_use]
pub fn parse_count(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let digits_end = raw
        .char_indices()
        .take_while(|(i, c)| c.is_ascii_digit() || (*i == 0 && matches!(*c, '+' | '-')))
        .map(|(i, c)| i + c.len_utf8())
        .last()?;
    raw[..digits_end].parse().ok()
}

/// One counter animating from 0 to its target.
#[derive(Debug, Clone, Copy)]
pub struct CounterAnimation {
    target: i64,
    started: Instant,
    duration: Duration,
}

impl CounterAnimation {
    #[must_use]
    pub fn start(target: i64, now: Instant) -> Self {
        Self {
            target,
            started: now,
            duration: COUNTER_DURATION,
        }
    }

    #[must_use]
    pub fn progress(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    #[must_use]
    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    /// Value to display at `now`; exactly the target once finished.
    #[must_use]
    pub fn value_at(&self, now: Instant) -> i64 {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.target;
        }
        (self.target as f64 * ease_out_cubic(progress)).floor() as i64
    }
}
