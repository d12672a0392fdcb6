//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::subscriber::DefaultGuard;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use formflow_config::MailSettings;
use formflow_engine::FormController;
use formflow_types::ApiKey;

pub const TEST_API_KEY: &str = "re_integration_secret";

/// Start a mock server that simulates the Resend API
pub async fn start_email_mock() -> MockServer {
    MockServer::start().await
}

/// Accept `POST /emails` with a Resend-shaped body, `expected` times.
pub async fn mount_email_accepted(server: &MockServer, expected: u64) {
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "4ef9a417-02e9-4d39-ad75-9611e0fcc33c"
        })))
        .expect(expected)
        .mount(server)
        .await;
}

/// Answer `POST /emails` with `status`, `expected` times.
pub async fn mount_email_status(server: &MockServer, status: u16, expected: u64) {
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(
            ResponseTemplate::new(status).set_body_string(r#"{"message":"upstream unavailable"}"#),
        )
        .expect(expected)
        .mount(server)
        .await;
}

pub fn mail_settings(server: &MockServer) -> MailSettings {
    MailSettings {
        endpoint: format!("{}/emails", server.uri()),
        api_key: ApiKey::new(TEST_API_KEY).expect("test key is non-empty"),
        from: "nettside@eks.no".to_string(),
        to: "post@eks.no".to_string(),
        connect_timeout: Duration::from_secs(5),
    }
}

/// The valid submission used by most scenarios.
pub const VALID_FIELDS: &[(&str, &str)] = &[
    ("navn", "Ola"),
    ("epost", "ola@eks.no"),
    ("telefon", "99887766"),
    ("prosjekt_type", "Kjøkken"),
];

pub fn fill(controller: &mut FormController, fields: &[(&str, &str)]) {
    for (name, value) in fields {
        controller.on_field_input(name, *value);
    }
}

/// In-memory sink for `tracing` output.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Route this thread's tracing events into the capture until the guard drops.
    pub fn install(&self) -> DefaultGuard {
        let sink = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || sink.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        let bytes = self.0.lock().expect("log buffer lock");
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Captured lines at `level` (e.g. `"ERROR"`).
    pub fn lines_at(&self, level: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.split_whitespace().nth(1) == Some(level))
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
