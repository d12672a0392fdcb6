//! Form submission engine for formflow.
//!
//! [`FormController`] owns one form: the values typed so far, the inline
//! error per field, the submit control, and the result banner. A host feeds it
//! input and blur events, asks it to submit, and calls [`FormController::tick`]
//! from its frame or timer loop so the banner can expire.
//!
//! The controller holds no global state and never touches the network itself;
//! delivery goes through an [`EmailDispatcher`] supplied per submit.

mod controller;
mod state;

pub use controller::{FormController, SubmitOutcome, SubmitRejection};
pub use state::{
    Banner, BannerKind, FormState, Phase, SENDING_LABEL, SUBMIT_LABEL, SubmitControl,
};

pub use formflow_config::{self, FormSettings, MailSettings};
pub use formflow_providers::{self, EmailDispatcher, ResendClient};
pub use formflow_types::{
    self, Delivery, FieldKind, FieldSpec, FormSchema, FormSnapshot, SubmissionError,
    ValidationError, ValidationOutcome,
};
