//! Site navigation bar and in-page anchor scrolling.

/// Scroll distance (px) after which the bar switches to its compact style.
pub const SCROLL_THRESHOLD: f64 = 50.0;

/// Navigation bar state: compact style on scroll, mobile menu open/closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Navigation {
    scrolled: bool,
    menu_open: bool,
}

impl Navigation {
    #[must_use]
    pub fn new(scroll_y: f64) -> Self {
        let mut nav = Self::default();
        nav.on_scroll(scroll_y);
        nav
    }

    /// Returns true when the compact style changed.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        let scrolled = scroll_y > SCROLL_THRESHOLD;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        changed
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    pub fn on_link_click(&mut self) {
        self.close_menu();
    }

    pub fn on_key(&mut self, key: &str) {
        if key == "Escape" {
            self.close_menu();
        }
    }

    /// A click anywhere on the page. Clicks outside the bar close an open menu.
    pub fn on_document_click(&mut self, inside_nav: bool) {
        if self.menu_open && !inside_nav {
            self.close_menu();
        }
    }

    #[must_use]
    pub const fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    #[must_use]
    pub const fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Page scrolling is locked while the mobile menu covers it.
    #[must_use]
    pub const fn body_scroll_locked(&self) -> bool {
        self.menu_open
    }
}

/// Element id targeted by an in-page link, or `None` for `#` and external links.
#[must_use]
pub fn anchor_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Absolute scroll position that puts the target just below the fixed bar.
///
/// `target_top` is the target's viewport-relative top; `None` when the id
/// does not resolve, in which case the browser default applies.
#[must_use]
pub fn scroll_target(
    href: &str,
    target_top: Option<f64>,
    scroll_y: f64,
    nav_height: f64,
) -> Option<f64> {
    anchor_id(href)?;
    target_top.map(|top| top + scroll_y - nav_height)
}
