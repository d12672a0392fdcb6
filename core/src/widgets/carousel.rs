//! Testimonial carousel.

use std::time::{Duration, Instant};

pub const AUTOPLAY_INTERVAL: Duration = Duration::from_secs(6);

/// Shows one slide at a time and advances on a fixed interval.
///
/// With zero or one slide the carousel is inert: nothing is hidden and
/// autoplay never starts.
#[derive(Debug, Clone)]
pub struct Carousel {
    len: usize,
    current: usize,
    next_advance: Option<Instant>,
}

impl Carousel {
    #[must_use]
    pub fn new(len: usize, now: Instant) -> Self {
        let next_advance = (len > 1).then(|| now + AUTOPLAY_INTERVAL);
        Self {
            len,
            current: 0,
            next_advance,
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.len > 1
    }

    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn is_visible(&self, index: usize) -> bool {
        !self.is_active() || index == self.current
    }

    /// Jump to `index`, wrapping one step past either end.
    pub fn go_to(&mut self, index: isize) {
        if !self.is_active() {
            return;
        }
        let last = self.len - 1;
        self.current = if index < 0 {
            last
        } else if index as usize > last {
            0
        } else {
            index as usize
        };
    }

    pub fn next(&mut self) {
        self.go_to(self.current as isize + 1);
    }

    pub fn prev(&mut self) {
        self.go_to(self.current as isize - 1);
    }

    pub fn stop_autoplay(&mut self) {
        self.next_advance = None;
    }

    #[must_use]
    pub const fn is_autoplaying(&self) -> bool {
        self.next_advance.is_some()
    }

    /// Advance once per elapsed interval.
    pub fn tick(&mut self, now: Instant) {
        while let Some(due) = self.next_advance {
            if now < due {
                break;
            }
            self.next();
            self.next_advance = Some(due + AUTOPLAY_INTERVAL);
        }
    }
}
