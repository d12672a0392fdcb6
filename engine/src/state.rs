//! Form display state: values, inline errors, submit control and banner.
//!
//! This is the contract a renderer reads after every controller call. It owns
//! no timers; the controller decides when a banner expires.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use formflow_types::{FormSnapshot, ValidationError};

pub const SUBMIT_LABEL: &str = "Send Forespørsel";
pub const SENDING_LABEL: &str = "Sender...";

/// Where the controller is in the submit workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    Sending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// Message shown above the form after a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    kind: BannerKind,
    text: String,
    shown_at: Instant,
    /// `None` when the duration runs past what `Instant` can represent.
    hide_at: Option<Instant>,
    scroll_requested: bool,
}

impl Banner {
    pub(crate) fn new(kind: BannerKind, text: impl Into<String>, now: Instant, ttl: Duration) -> Self {
        Self {
            kind,
            text: text.into(),
            shown_at: now,
            hide_at: now.checked_add(ttl),
            scroll_requested: true,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> BannerKind {
        self.kind
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn shown_at(&self) -> Instant {
        self.shown_at
    }

    /// When the banner auto-hides; `None` means it stays until replaced.
    #[must_use]
    pub const fn hide_at(&self) -> Option<Instant> {
        self.hide_at
    }

    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        self.hide_at.is_some_and(|hide_at| now >= hide_at)
    }
}

/// The submit button as the renderer should draw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: &'static str,
}

impl SubmitControl {
    pub const READY: Self = Self {
        enabled: true,
        label: SUBMIT_LABEL,
    };
    pub const SENDING: Self = Self {
        enabled: false,
        label: SENDING_LABEL,
    };
}

impl Default for SubmitControl {
    fn default() -> Self {
        Self::READY
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormState {
    values: FormSnapshot,
    errors: HashMap<String, ValidationError>,
    submit: SubmitControl,
    banner: Option<Banner>,
}

impl FormState {
    #[must_use]
    pub fn value(&self, name: &str) -> &str {
        self.values.value(name)
    }

    #[must_use]
    pub fn values(&self) -> &FormSnapshot {
        &self.values
    }

    #[must_use]
    pub fn error(&self, name: &str) -> Option<ValidationError> {
        self.errors.get(name).copied()
    }

    /// Inline message for `name`, if it currently shows an error.
    #[must_use]
    pub fn error_message(&self, name: &str) -> Option<&'static str> {
        self.error(name).map(ValidationError::user_message)
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> impl Iterator<Item = (&str, ValidationError)> {
        self.errors.iter().map(|(name, err)| (name.as_str(), *err))
    }

    #[must_use]
    pub const fn submit_control(&self) -> SubmitControl {
        self.submit
    }

    /// The banner, if one is currently displayed.
    #[must_use]
    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    #[must_use]
    pub fn is_banner_visible(&self) -> bool {
        self.banner.is_some()
    }

    /// True once after a banner is shown; the renderer scrolls it into view.
    pub fn take_scroll_request(&mut self) -> bool {
        self.banner
            .as_mut()
            .is_some_and(|banner| std::mem::take(&mut banner.scroll_requested))
    }

    pub(crate) fn set_value(&mut self, name: &str, value: String) {
        self.values.insert(name, value);
    }

    pub(crate) fn set_error(&mut self, name: &str, error: Option<ValidationError>) {
        match error {
            Some(err) => {
                self.errors.insert(name.to_string(), err);
            }
            None => {
                self.errors.remove(name);
            }
        }
    }

    pub(crate) fn clear_error(&mut self, name: &str) {
        self.errors.remove(name);
    }

    pub(crate) fn reset_fields(&mut self) {
        self.values = FormSnapshot::new();
        self.errors.clear();
    }

    pub(crate) fn set_submit_control(&mut self, control: SubmitControl) {
        self.submit = control;
    }

    pub(crate) fn show_banner(&mut self, banner: Banner) {
        self.banner = Some(banner);
    }

    /// Drop the banner if its deadline has passed. Returns true if it was hidden.
    pub(crate) fn expire_banner(&mut self, now: Instant) -> bool {
        if self.banner.as_ref().is_some_and(|banner| banner.is_expired(now)) {
            self.banner = None;
            return true;
        }
        false
    }
}
