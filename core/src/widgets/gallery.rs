//! Project gallery category filter.

use std::time::{Duration, Instant};

/// Filter value that matches every category.
pub const FILTER_ALL: &str = "all";
/// Delay before a shown item fades back to full opacity.
pub const FADE_IN_DELAY: Duration = Duration::from_millis(50);
/// Fade-out time before a filtered item leaves the layout.
pub const FADE_OUT_DURATION: Duration = Duration::from_millis(300);

/// Display phase of one gallery item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemPhase {
    Visible,
    /// In the layout, still transparent until `at`.
    Appearing { at: Instant },
    /// Fading out; leaves the layout at `at`.
    Disappearing { at: Instant },
    Hidden,
}

impl ItemPhase {
    /// Whether the item takes up space in the layout.
    #[must_use]
    pub const fn is_displayed(self) -> bool {
        !matches!(self, Self::Hidden)
    }

    #[must_use]
    pub const fn is_opaque(self) -> bool {
        matches!(self, Self::Visible)
    }
}

#[derive(Debug, Clone)]
struct Item {
    category: String,
    phase: ItemPhase,
}

/// Filter buttons plus the items they control.
///
/// A later filter click supersedes pending fades from an earlier one, so an
/// item shown again is never hidden by a stale fade-out.
#[derive(Debug, Clone)]
pub struct GalleryFilter {
    active: String,
    items: Vec<Item>,
}

impl GalleryFilter {
    #[must_use]
    pub fn new(categories: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            active: FILTER_ALL.to_string(),
            items: categories
                .into_iter()
                .map(|category| Item {
                    category: category.into(),
                    phase: ItemPhase::Visible,
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn active_filter(&self) -> &str {
        &self.active
    }

    #[must_use]
    pub fn matches(filter: &str, category: &str) -> bool {
        filter == FILTER_ALL || filter == category
    }

    /// Select a filter button.
    pub fn apply(&mut self, filter: &str, now: Instant) {
        self.active = filter.to_string();
        for item in &mut self.items {
            item.phase = if Self::matches(filter, &item.category) {
                ItemPhase::Appearing {
                    at: now + FADE_IN_DELAY,
                }
            } else {
                ItemPhase::Disappearing {
                    at: now + FADE_OUT_DURATION,
                }
            };
        }
        tracing::debug!(filter, "Gallery filter applied");
    }

    /// Complete fades whose deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        for item in &mut self.items {
            item.phase = match item.phase {
                ItemPhase::Appearing { at } if now >= at => ItemPhase::Visible,
                ItemPhase::Disappearing { at } if now >= at => ItemPhase::Hidden,
                phase => phase,
            };
        }
    }

    #[must_use]
    pub fn phase(&self, index: usize) -> Option<ItemPhase> {
        self.items.get(index).map(|item| item.phase)
    }

    /// Indices of items currently in the layout.
    #[must_use]
    pub fn displayed(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.phase.is_displayed())
            .map(|(i, _)| i)
            .collect()
    }
}
