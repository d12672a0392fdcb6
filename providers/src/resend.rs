//! Resend email API client.
//!
//! One `POST` per submission, bearer-authenticated, JSON body. No retries: a
//! failed attempt is reported to the caller, which decides what the visitor
//! sees.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use url::Url;

use formflow_config::MailSettings;
use formflow_types::{ApiKey, Delivery, FormSnapshot, SubmissionError, SubmissionResult};

use crate::message::build_payload;
use crate::{EmailDispatcher, generate_idempotency_key, http_client, read_capped_error_body};

#[derive(Debug, Clone)]
pub struct ResendClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: ApiKey,
    from: String,
    to: String,
}

impl ResendClient {
    pub fn new(settings: &MailSettings) -> Result<Self, reqwest::Error> {
        // Only an endpoint that parses as plain http may skip TLS.
        let https_only = !Url::parse(&settings.endpoint).is_ok_and(|url| url.scheme() == "http");
        let http = http_client(settings.connect_timeout, https_only)?;
        Ok(Self::with_client(http, settings))
    }

    /// Use a caller-built HTTP client.
    #[must_use]
    pub fn with_client(http: reqwest::Client, settings: &MailSettings) -> Self {
        Self {
            http,
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
            from: settings.from.clone(),
            to: settings.to.clone(),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, snapshot: &FormSnapshot) -> SubmissionResult {
        let payload = build_payload(snapshot, &self.from, &self.to);
        let idempotency_key = generate_idempotency_key();

        tracing::debug!(endpoint = %self.endpoint, %idempotency_key, "Sending contact email");

        let response = self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, self.api_key.bearer())
            .header(CONTENT_TYPE, "application/json")
            .header("Idempotency-Key", &idempotency_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| SubmissionError::Transport(describe_transport_error(e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = read_capped_error_body(response).await;
            return Err(SubmissionError::NonSuccessStatus {
                status: status.as_u16(),
                body,
            });
        }

        // A 2xx is a delivery even if the body is not the documented shape.
        let id = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| body.get("id").and_then(Value::as_str).map(str::to_string));

        tracing::info!(status = status.as_u16(), id = ?id, "Contact email accepted");
        Ok(Delivery { id })
    }
}

impl EmailDispatcher for ResendClient {
    async fn send(&self, snapshot: &FormSnapshot) -> SubmissionResult {
        self.post(snapshot).await
    }
}

fn describe_transport_error(err: reqwest::Error) -> String {
    let kind = if err.is_timeout() {
        "timed out"
    } else if err.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };
    // Drop the URL; it adds nothing for operators and may carry query secrets.
    format!("{kind}: {}", err.without_url())
}
