//! UI-agnostic models of the site's decorative behaviors.
//!
//! Each model is plain state driven by method calls; a host renderer applies
//! the resulting flags (classes, styles, attributes) to its own elements.

mod carousel;
mod counter;
mod gallery;
mod nav;
mod parallax;
mod timing;
mod viewport;

pub use carousel::{AUTOPLAY_INTERVAL, Carousel};
pub use counter::{COUNTER_DURATION, CounterAnimation, ease_out_cubic, parse_count};
pub use gallery::{FADE_IN_DELAY, FADE_OUT_DURATION, FILTER_ALL, GalleryFilter, ItemPhase};
pub use nav::{Navigation, SCROLL_THRESHOLD, anchor_id, scroll_target};
pub use parallax::{DEFAULT_SPEED, parallax_offset, parallax_transform};
pub use timing::{DEFAULT_WAIT, Debounce, Throttle};
pub use viewport::{Bounds, LazyImages, ObserverOptions, OneShotObserver, ScrollReveal};
