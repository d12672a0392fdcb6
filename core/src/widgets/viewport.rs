//! Viewport intersection: scroll-triggered reveal and lazy image loading.
//!
//! Both behaviors are one-shot: an element is acted on the first time it
//! intersects the (margin-adjusted) viewport and is never observed again.

use std::collections::BTreeMap;

/// Vertical extent of an element relative to the viewport top, in px.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub bottom: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            bottom: top + height.max(0.0),
        }
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Root margins grow (positive) or shrink (negative) the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    pub margin_top: f64,
    pub margin_bottom: f64,
    /// Visible fraction of the element required to count as intersecting.
    pub threshold: f64,
}

impl ObserverOptions {
    /// Reveal once 10% is visible, ignoring the bottom 100px of the viewport.
    pub const REVEAL: Self = Self {
        margin_top: 0.0,
        margin_bottom: -100.0,
        threshold: 0.1,
    };

    /// Start loading 100px before an image scrolls into view.
    pub const LAZY_IMAGE: Self = Self {
        margin_top: 100.0,
        margin_bottom: 100.0,
        threshold: 0.0,
    };

    /// Start a statistic counter once half of it is visible.
    pub const COUNTER: Self = Self {
        margin_top: 0.0,
        margin_bottom: 0.0,
        threshold: 0.5,
    };

    #[must_use]
    pub fn intersects(&self, bounds: Bounds, viewport_height: f64) -> bool {
        let root_top = -self.margin_top;
        let root_bottom = viewport_height + self.margin_bottom;
        let overlap = bounds.bottom.min(root_bottom) - bounds.top.max(root_top);
        if overlap < 0.0 {
            return false;
        }
        let height = bounds.height();
        if height <= 0.0 {
            return true;
        }
        overlap / height >= self.threshold
    }
}

/// Watches keyed elements and reports each one the first time it intersects.
#[derive(Debug, Clone)]
pub struct OneShotObserver<K> {
    options: ObserverOptions,
    pending: Vec<K>,
}

impl<K: Clone + PartialEq> OneShotObserver<K> {
    #[must_use]
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            pending: Vec::new(),
        }
    }

    pub fn observe(&mut self, key: K) {
        if !self.pending.contains(&key) {
            self.pending.push(key);
        }
    }

    /// Feed current element bounds; returns newly intersecting keys, which
    /// stop being observed.
    pub fn update<'a, I>(&mut self, bounds: I, viewport_height: f64) -> Vec<K>
    where
        I: IntoIterator<Item = (&'a K, Bounds)>,
        K: 'a,
    {
        let mut hits = Vec::new();
        for (key, rect) in bounds {
            if self.pending.contains(key) && self.options.intersects(rect, viewport_height) {
                hits.push(key.clone());
            }
        }
        self.pending.retain(|key| !hits.contains(key));
        hits
    }

    #[must_use]
    pub fn is_observing(&self, key: &K) -> bool {
        self.pending.contains(key)
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

/// Reveal animation trigger for `.reveal`-style elements.
#[derive(Debug, Clone)]
pub struct ScrollReveal<K> {
    observer: OneShotObserver<K>,
    revealed: Vec<K>,
}

impl<K: Clone + PartialEq> ScrollReveal<K> {
    #[must_use]
    pub fn new(elements: impl IntoIterator<Item = K>) -> Self {
        let mut observer = OneShotObserver::new(ObserverOptions::REVEAL);
        for element in elements {
            observer.observe(element);
        }
        Self {
            observer,
            revealed: Vec::new(),
        }
    }

    /// Returns elements that became active in this update.
    pub fn update<'a, I>(&mut self, bounds: I, viewport_height: f64) -> Vec<K>
    where
        I: IntoIterator<Item = (&'a K, Bounds)>,
        K: 'a,
    {
        let hits = self.observer.update(bounds, viewport_height);
        self.revealed.extend(hits.iter().cloned());
        hits
    }

    #[must_use]
    pub fn is_active(&self, element: &K) -> bool {
        self.revealed.contains(element)
    }
}

/// Images whose real source waits in a `data-src` attribute.
#[derive(Debug, Clone)]
pub struct LazyImages<K: Ord> {
    observer: Option<OneShotObserver<K>>,
    deferred: BTreeMap<K, String>,
}

impl<K: Clone + Ord> LazyImages<K> {
    /// `observer_supported = false` loads everything immediately, like a
    /// browser without `IntersectionObserver`.
    #[must_use]
    pub fn new(images: impl IntoIterator<Item = (K, String)>, observer_supported: bool) -> Self {
        let deferred: BTreeMap<K, String> = images.into_iter().collect();
        let observer = observer_supported.then(|| {
            let mut observer = OneShotObserver::new(ObserverOptions::LAZY_IMAGE);
            for key in deferred.keys() {
                observer.observe(key.clone());
            }
            observer
        });
        Self { observer, deferred }
    }

    /// Sources to assign now: everything on the fallback path, otherwise the
    /// images that came near the viewport.
    pub fn update<'a, I>(&mut self, bounds: I, viewport_height: f64) -> Vec<(K, String)>
    where
        I: IntoIterator<Item = (&'a K, Bounds)>,
        K: 'a,
    {
        let keys: Vec<K> = match self.observer.as_mut() {
            Some(observer) => observer.update(bounds, viewport_height),
            None => self.deferred.keys().cloned().collect(),
        };
        keys.into_iter()
            .filter_map(|key| self.deferred.remove(&key).map(|src| (key, src)))
            .collect()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.deferred.len()
    }
}
