//! Configuration file loading into runtime settings

use std::io::Write;
use std::time::{Duration, Instant};

use formflow_config::{ConfigError, FormflowConfig};
use formflow_engine::{Delivery, FormController};
use formflow_types::{FieldKind, FormSnapshot};

use crate::common::{VALID_FIELDS, fill};

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn full_config_file_resolves() {
    let file = write_config(
        r#"
[mail]
endpoint = "https://mail.example.test/emails"
api_key = "re_from_file"
from = "web@eks.no"
to = "salg@eks.no"
connect_timeout_secs = 10

[form]
mask_submission_failures = false
banner_seconds = 8
success_message = "Mottatt!"

[[form.fields]]
name = "navn"
type = "text"
required = true

[[form.fields]]
name = "mobil"
type = "TEL"
"#,
    );

    let config = FormflowConfig::load_from(file.path()).unwrap();

    let mail = config.mail_settings_with(None).unwrap();
    assert_eq!(mail.endpoint, "https://mail.example.test/emails");
    assert_eq!(mail.api_key.as_str(), "re_from_file");
    assert_eq!(mail.from, "web@eks.no");
    assert_eq!(mail.to, "salg@eks.no");
    assert_eq!(mail.connect_timeout, Duration::from_secs(10));

    let form = config.form_settings();
    assert!(!form.mask_submission_failures);
    assert_eq!(form.banner_duration, Duration::from_secs(8));
    assert_eq!(form.success_message, "Mottatt!");
    assert_eq!(form.schema.len(), 2);
    assert_eq!(form.schema.get("mobil").unwrap().kind(), &FieldKind::Tel);

    let failures = formflow_core::validate_form(
        &form.schema,
        &FormSnapshot::new().with("navn", "Kari").with("mobil", "abc"),
    );
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, "mobil");
}

#[test]
fn environment_credential_wins_over_file() {
    let file = write_config("[mail]\napi_key = \"re_from_file\"\n");
    let config = FormflowConfig::load_from(file.path()).unwrap();

    let mail = config
        .mail_settings_with(Some("re_from_env".to_string()))
        .unwrap();
    assert_eq!(mail.api_key.as_str(), "re_from_env");
    assert!(!format!("{mail:?}").contains("re_from_env"));
}

#[test]
fn plain_http_endpoint_needs_opt_in() {
    let file = write_config("[mail]\nendpoint = \"http://127.0.0.1:9/emails\"\n");
    let config = FormflowConfig::load_from(file.path()).unwrap();
    assert!(matches!(
        config.mail_settings_with(Some("re_x".to_string())),
        Err(ConfigError::InsecureEndpoint(_))
    ));

    let file = write_config(
        "[mail]\nendpoint = \"http://127.0.0.1:9/emails\"\nallow_insecure_endpoint = true\n",
    );
    let config = FormflowConfig::load_from(file.path()).unwrap();
    assert!(config.mail_settings_with(Some("re_x".to_string())).is_ok());
}

#[test]
fn malformed_file_is_a_parse_error() {
    let file = write_config("[form]\nbanner_seconds = \"fem\"\n");
    assert!(matches!(
        FormflowConfig::load_from(file.path()),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn endpoint_with_spaces_in_host_is_rejected() {
    let file = write_config("[mail]\nendpoint = \"https://exa mple .com/emails\"\n");
    let config = FormflowConfig::load_from(file.path()).unwrap();
    assert!(matches!(
        config.mail_settings_with(Some("re_x".to_string())),
        Err(ConfigError::InvalidEndpoint(_))
    ));
}

#[test]
fn largest_banner_seconds_does_not_break_submit() {
    let file = write_config("[form]\nbanner_seconds = 9223372036854775807\n");
    let config = FormflowConfig::load_from(file.path()).unwrap();

    let mut controller = FormController::new(config.form_settings());
    fill(&mut controller, VALID_FIELDS);
    controller.begin_submit().unwrap();
    let outcome = controller.finish_submit(Ok(Delivery::default()), Instant::now());

    assert!(outcome.is_delivered());
    assert!(controller.state().is_banner_visible());
}
