//! Contact form submission workflow.
//!
//! ```text
//! Idle -> Validating -> Idle              (rejected, no network)
//!                    -> Sending -> Idle   (one dispatcher call)
//! ```
//!
//! Every transition takes `&mut self`, so one controller never has two
//! submissions in flight. Hosts that drive the network call themselves use
//! [`FormController::begin_submit`] and [`FormController::finish_submit`];
//! a second `begin_submit` before `finish_submit` is rejected as
//! [`SubmitRejection::Busy`].

use std::time::Instant;

use thiserror::Error;

use formflow_config::FormSettings;
use formflow_core::{validate_field, validate_form};
use formflow_providers::EmailDispatcher;
use formflow_types::{
    Delivery, FormSchema, FormSnapshot, SubmissionError, SubmissionResult, ValidationError,
    ValidationOutcome,
};

use crate::state::{Banner, BannerKind, FormState, Phase, SubmitControl};

/// Why a submit action did not reach the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejection {
    #[error("a submission is already in flight")]
    Busy,
    #[error("{} field(s) failed validation", .fields.len())]
    Invalid {
        fields: Vec<(String, ValidationError)>,
    },
}

/// What a submit action ended in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected(SubmitRejection),
    Delivered(Delivery),
    /// Delivery failed but the visitor was shown the success banner.
    MaskedFailure(SubmissionError),
    Failed(SubmissionError),
}

impl SubmitOutcome {
    /// True when the dispatcher was called.
    #[must_use]
    pub const fn attempted_delivery(&self) -> bool {
        !matches!(self, Self::Rejected(_))
    }

    /// True when the email actually went out.
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered(_))
    }

    #[must_use]
    pub const fn failure(&self) -> Option<&SubmissionError> {
        match self {
            Self::MaskedFailure(err) | Self::Failed(err) => Some(err),
            Self::Rejected(_) | Self::Delivered(_) => None,
        }
    }
}

/// One contact form's lifecycle, from keystrokes to the result banner.
#[derive(Debug)]
pub struct FormController {
    settings: FormSettings,
    state: FormState,
    phase: Phase,
}

impl FormController {
    #[must_use]
    pub fn new(settings: FormSettings) -> Self {
        Self {
            settings,
            state: FormState::default(),
            phase: Phase::Idle,
        }
    }

    #[must_use]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut FormState {
        &mut self.state
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn schema(&self) -> &FormSchema {
        &self.settings.schema
    }

    #[must_use]
    pub fn settings(&self) -> &FormSettings {
        &self.settings
    }

    /// Store a new value and drop any error shown for the field.
    ///
    /// The value is not re-validated until the next blur or submit.
    pub fn on_field_input(&mut self, name: &str, value: impl Into<String>) {
        self.state.set_value(name, value.into());
        self.state.clear_error(name);
    }

    /// Validate one field and show or clear its error.
    ///
    /// Fields outside the schema have no rules and are always valid.
    pub fn on_field_blur(&mut self, name: &str) -> ValidationOutcome {
        let Some(spec) = self.settings.schema.get(name) else {
            return ValidationOutcome::Valid;
        };
        let outcome = validate_field(spec, self.state.value(name));
        self.state.set_error(name, outcome.error());
        outcome
    }

    /// Validate the whole form and, if it passes, enter `Sending`.
    ///
    /// Returns the snapshot to deliver. Every rule-carrying field's error is
    /// refreshed, so a rejected form shows all of its problems at once.
    pub fn begin_submit(&mut self) -> Result<FormSnapshot, SubmitRejection> {
        if self.phase == Phase::Sending {
            tracing::debug!("Submit ignored; a submission is already in flight");
            return Err(SubmitRejection::Busy);
        }

        self.phase = Phase::Validating;
        let snapshot = self.snapshot();
        let failures = validate_form(&self.settings.schema, &snapshot);

        for spec in self.settings.schema.iter().filter(|spec| spec.has_rule()) {
            let error = failures
                .iter()
                .find(|(name, _)| name == spec.name())
                .map(|(_, err)| *err);
            self.state.set_error(spec.name(), error);
        }

        if !failures.is_empty() {
            self.phase = Phase::Idle;
            tracing::debug!(invalid = failures.len(), "Submit rejected by validation");
            return Err(SubmitRejection::Invalid { fields: failures });
        }

        self.phase = Phase::Sending;
        self.state.set_submit_control(SubmitControl::SENDING);
        Ok(snapshot)
    }

    /// Apply a delivery result and return to `Idle`.
    pub fn finish_submit(&mut self, result: SubmissionResult, now: Instant) -> SubmitOutcome {
        if self.phase != Phase::Sending {
            tracing::warn!(phase = ?self.phase, "Submission finished without a matching begin");
        }
        self.phase = Phase::Idle;
        self.state.set_submit_control(SubmitControl::READY);

        match result {
            Ok(delivery) => {
                tracing::info!(id = ?delivery.id, "Contact form delivered");
                self.show_success(now);
                SubmitOutcome::Delivered(delivery)
            }
            Err(err) if self.settings.mask_submission_failures => {
                let fields: Vec<&str> = self.state.values().iter().map(|(name, _)| name).collect();
                tracing::error!(
                    error = %err,
                    status = ?err.status(),
                    ?fields,
                    "Contact form delivery failed; visitor was shown success"
                );
                self.show_success(now);
                SubmitOutcome::MaskedFailure(err)
            }
            Err(err) => {
                tracing::warn!(error = %err, status = ?err.status(), "Contact form delivery failed");
                let banner = Banner::new(
                    BannerKind::Error,
                    self.settings.failure_message.clone(),
                    now,
                    self.settings.banner_duration,
                );
                self.state.show_banner(banner);
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Run the full submit workflow against `dispatcher`.
    ///
    /// The dispatcher is called at most once. The banner deadline starts when
    /// the response arrives.
    pub async fn on_submit<D: EmailDispatcher>(&mut self, dispatcher: &D) -> SubmitOutcome {
        let snapshot = match self.begin_submit() {
            Ok(snapshot) => snapshot,
            Err(rejection) => return SubmitOutcome::Rejected(rejection),
        };
        let result = dispatcher.send(&snapshot).await;
        self.finish_submit(result, Instant::now())
    }

    /// Advance timers; hides the banner once its deadline passes.
    pub fn tick(&mut self, now: Instant) {
        if self.state.expire_banner(now) {
            tracing::trace!("Banner hidden");
        }
    }

    fn show_success(&mut self, now: Instant) {
        self.state.reset_fields();
        let banner = Banner::new(
            BannerKind::Success,
            self.settings.success_message.clone(),
            now,
            self.settings.banner_duration,
        );
        self.state.show_banner(banner);
    }

    /// Current values in schema order, followed by any extra fields.
    fn snapshot(&self) -> FormSnapshot {
        let mut snapshot: FormSnapshot = self
            .settings
            .schema
            .iter()
            .map(|spec| (spec.name().to_string(), self.state.value(spec.name()).to_string()))
            .collect();
        for (name, value) in self.state.values().iter() {
            if self.settings.schema.get(name).is_none() {
                snapshot.insert(name, value);
            }
        }
        snapshot
    }
}
