//! Core domain logic for formflow.
//!
//! This crate holds the pure pieces of the site behavior layer:
//!
//! - [`validator`] - FieldValidator: judges one field value against its rules
//! - [`widgets`] - UI-agnostic state models for the rest of the page
//!   (navigation, scroll reveal, gallery filter, carousel, counters, ...)
//!
//! Nothing here touches a DOM, a clock, or the network. Time-dependent models
//! take an [`std::time::Instant`] from the caller.

pub mod validator;
pub mod widgets;

pub use validator::{
    is_valid_email, is_valid_phone, rules_for, validate, validate_field, validate_form,
};
