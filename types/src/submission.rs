//! Outcome of contacting the remote email service.

use thiserror::Error;

/// Accepted delivery. `id` is the provider's message id when it returned one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delivery {
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The request never produced an HTTP response.
    #[error("transport failure: {0}")]
    Transport(String),
    /// The provider answered with a non-2xx status.
    #[error("email API returned {status}: {body}")]
    NonSuccessStatus { status: u16, body: String },
}

impl SubmissionError {
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(_) => None,
            Self::NonSuccessStatus { status, .. } => Some(*status),
        }
    }
}

pub type SubmissionResult = Result<Delivery, SubmissionError>;
