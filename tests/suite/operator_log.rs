//! Masked failures: the visitor sees success, operators see the error

use formflow_config::FormSettings;
use formflow_engine::{BannerKind, FormController, SubmitOutcome};
use formflow_providers::ResendClient;

use crate::common::{
    LogCapture, TEST_API_KEY, VALID_FIELDS, fill, mail_settings, mount_email_accepted,
    mount_email_status, start_email_mock,
};

#[tokio::test]
async fn masked_failure_is_logged_at_error_level() {
    let logs = LogCapture::default();
    let _guard = logs.install();

    let server = start_email_mock().await;
    mount_email_status(&server, 503, 1).await;
    let client = ResendClient::new(&mail_settings(&server)).unwrap();

    let mut controller = FormController::new(FormSettings::default());
    fill(&mut controller, VALID_FIELDS);
    let outcome = controller.on_submit(&client).await;

    assert!(matches!(outcome, SubmitOutcome::MaskedFailure(_)));
    assert_eq!(controller.state().banner().unwrap().kind(), BannerKind::Success);

    let errors = logs.lines_at("ERROR");
    assert_eq!(errors.len(), 1, "{}", logs.contents());
    let line = &errors[0];
    assert!(line.contains("Contact form delivery failed"), "{line}");
    assert!(line.contains("503"), "{line}");
    assert!(line.contains("navn"), "{line}");

    assert!(!logs.contents().contains(TEST_API_KEY));
}

#[tokio::test]
async fn delivered_submission_logs_no_error() {
    let logs = LogCapture::default();
    let _guard = logs.install();

    let server = start_email_mock().await;
    mount_email_accepted(&server, 1).await;
    let client = ResendClient::new(&mail_settings(&server)).unwrap();

    let mut controller = FormController::new(FormSettings::default());
    fill(&mut controller, VALID_FIELDS);
    controller.on_submit(&client).await;

    assert!(logs.lines_at("ERROR").is_empty(), "{}", logs.contents());
    assert!(logs.contents().contains("Contact form delivered"));
}

#[tokio::test]
async fn unmasked_failure_is_a_warning_not_an_error() {
    let logs = LogCapture::default();
    let _guard = logs.install();

    let server = start_email_mock().await;
    mount_email_status(&server, 422, 1).await;
    let client = ResendClient::new(&mail_settings(&server)).unwrap();

    let mut controller = FormController::new(FormSettings {
        mask_submission_failures: false,
        ..FormSettings::default()
    });
    fill(&mut controller, VALID_FIELDS);
    controller.on_submit(&client).await;

    assert!(logs.lines_at("ERROR").is_empty());
    assert_eq!(logs.lines_at("WARN").len(), 1, "{}", logs.contents());
}
