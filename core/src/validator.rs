//! Field validation.
//!
//! [`validate`] judges one raw value against the rules implied by a field's
//! kind and required marker. It is pure and never fails: the caller decides
//! how to display the outcome.
//!
//! # Rules
//!
//! | Rule | Applies when | Rejects |
//! |------|--------------|---------|
//! | Required | field is marked required | empty or whitespace-only value |
//! | Email | kind is `email` and value non-empty | anything not shaped `local@domain.tld` |
//! | Phone | kind is `tel` and value non-empty | fewer than 8 chars, or chars outside digits, spaces, `+`, `-` |
//!
//! Values are trimmed before every check. At most one error is reported: a
//! blank required field never reaches the email or phone check.

use std::sync::OnceLock;

use regex::Regex;

use formflow_types::{
    FieldKind, FieldRule, FieldSpec, FormSchema, FormSnapshot, ValidationError, ValidationOutcome,
};

struct Patterns {
    email: Regex,
    phone: Regex,
}

impl Patterns {
    fn new() -> Self {
        Self {
            email: Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"),
            // ASCII digits only; `\d` would accept any Unicode decimal digit.
            phone: Regex::new(r"^[0-9\s+\-]{8,}$").expect("valid phone regex"),
        }
    }
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(Patterns::new)
}

#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    patterns().email.is_match(value)
}

#[must_use]
pub fn is_valid_phone(value: &str) -> bool {
    patterns().phone.is_match(value)
}

/// Rules implied by a field's kind and required marker.
#[must_use]
pub fn rules_for(kind: &FieldKind, required: bool) -> Vec<FieldRule> {
    FieldRule::derive(kind, required)
}

/// Validate a raw field value.
#[must_use]
pub fn validate(kind: &FieldKind, raw_value: &str, required: bool) -> ValidationOutcome {
    let value = raw_value.trim();

    if value.is_empty() {
        return if required {
            ValidationOutcome::Invalid(ValidationError::Required)
        } else {
            ValidationOutcome::Valid
        };
    }

    match kind {
        FieldKind::Email if !is_valid_email(value) => {
            ValidationOutcome::Invalid(ValidationError::InvalidEmail)
        }
        FieldKind::Tel if !is_valid_phone(value) => {
            ValidationOutcome::Invalid(ValidationError::InvalidPhone)
        }
        _ => ValidationOutcome::Valid,
    }
}

#[must_use]
pub fn validate_field(spec: &FieldSpec, raw_value: &str) -> ValidationOutcome {
    validate(spec.kind(), raw_value, spec.is_required())
}

/// Validate every rule-carrying field of `schema` against `snapshot`.
///
/// Returns the invalid fields in schema order; empty means the form may be sent.
#[must_use]
pub fn validate_form(schema: &FormSchema, snapshot: &FormSnapshot) -> Vec<(String, ValidationError)> {
    schema
        .iter()
        .filter(|spec| spec.has_rule())
        .filter_map(|spec| {
            validate_field(spec, snapshot.value(spec.name()))
                .error()
                .map(|err| (spec.name().to_string(), err))
        })
        .collect()
}
