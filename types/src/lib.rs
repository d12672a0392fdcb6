//! Core domain types for formflow.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod field;
mod sanitize;
mod snapshot;
mod submission;

pub use field::{
    FieldKind, FieldRule, FieldSpec, FormSchema, ValidationError, ValidationOutcome,
};
pub use sanitize::escape_html;
pub use snapshot::FormSnapshot;
pub use submission::{Delivery, SubmissionError, SubmissionResult};

use thiserror::Error;

// ============================================================================
// Credentials
// ============================================================================

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidApiKeyError {
    #[error("API key must not be empty")]
    Empty,
    /// Only visible ASCII can travel in the `Authorization` header.
    #[error("API key has a character that is not visible ASCII at byte {position}")]
    InvalidCharacter { position: usize },
}

/// Bearer credential for the email API.
///
/// Never constructed from a literal in library code; the composition root
/// reads it from configuration or the environment.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidApiKeyError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(InvalidApiKeyError::Empty);
        }
        if let Some(position) = trimmed.bytes().position(|b| !b.is_ascii_graphic()) {
            return Err(InvalidApiKeyError::InvalidCharacter { position });
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

// Manual Debug impl to prevent leaking API keys in logs.
impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiKey(<redacted>)")
    }
}
