//! Email delivery for contact form submissions.
//!
//! # Architecture
//!
//! - [`EmailDispatcher`] - the seam the submission controller sends through
//! - [`resend`] - Resend HTTP API client, the production dispatcher
//! - [`message`] - subject and HTML body built from a [`FormSnapshot`]
//!
//! A dispatcher makes exactly one attempt per call. Failures are returned to
//! the caller as [`SubmissionError`](formflow_types::SubmissionError) and are
//! not retried.
//!
//! # HTTP client
//!
//! [`http_client`] builds the shared client settings: no redirects, TCP
//! keepalive, bounded idle pool, and a connect timeout. HTTPS is enforced
//! unless the configured endpoint is plain `http://` (allowed only via
//! `allow_insecure_endpoint`).

use std::future::Future;
use std::time::Duration;

use uuid::Uuid;

pub use formflow_types;
use formflow_types::{FormSnapshot, SubmissionResult};

pub mod message;
pub mod resend;

pub use message::{EmailPayload, build_payload, format_html_body, format_subject};
pub use resend::ResendClient;

// reqwest only exposes tcp_keepalive (idle time); interval/retries use platform defaults.
const TCP_KEEPALIVE_SECS: u64 = 60;

const POOL_MAX_IDLE_PER_HOST: usize = 4;
const POOL_IDLE_TIMEOUT_SECS: u64 = 90;

const MAX_ERROR_BODY_BYTES: usize = 32 * 1024;

/// Sends one form snapshot as an email.
///
/// Implementations perform a single attempt and report the result; the caller
/// owns user-facing messaging and any failure policy.
pub trait EmailDispatcher {
    fn send(&self, snapshot: &FormSnapshot) -> impl Future<Output = SubmissionResult> + Send;
}

pub fn http_client(
    connect_timeout: Duration,
    https_only: bool,
) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .connect_timeout(connect_timeout)
        .redirect(reqwest::redirect::Policy::none())
        .https_only(https_only)
        .tcp_keepalive(Some(Duration::from_secs(TCP_KEEPALIVE_SECS)))
        .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
        .pool_idle_timeout(Some(Duration::from_secs(POOL_IDLE_TIMEOUT_SECS)))
        .build()
}

/// Fresh key per submission; lets the email API drop accidental duplicates.
#[must_use]
pub fn generate_idempotency_key() -> String {
    format!("formflow-{}", Uuid::new_v4())
}

/// Read an error response body, keeping at most 32 KiB.
pub async fn read_capped_error_body(response: reqwest::Response) -> String {
    use futures_util::StreamExt;
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let Ok(chunk) = chunk else { break };
        body.extend_from_slice(&chunk);
        if body.len() > MAX_ERROR_BODY_BYTES {
            body.truncate(MAX_ERROR_BODY_BYTES);
            let text = String::from_utf8_lossy(&body);
            return format!("{text}...(truncated)");
        }
    }
    String::from_utf8_lossy(&body).into_owned()
}
