//! Contact form submission end to end: controller, Resend client, mock API

use std::time::{Duration, Instant};

use formflow_config::FormSettings;
use formflow_engine::{
    BannerKind, FormController, Phase, SUBMIT_LABEL, SubmitOutcome, SubmitRejection,
};
use formflow_providers::ResendClient;
use formflow_types::{SubmissionError, ValidationError};

use crate::common::{
    VALID_FIELDS, fill, mail_settings, mount_email_accepted, mount_email_status, start_email_mock,
};

const SUCCESS_TEXT: &str = "Takk for din henvendelse! Vi kontakter deg innen 24 timer.";

#[tokio::test]
async fn rejected_form_never_reaches_network() {
    let server = start_email_mock().await;
    mount_email_accepted(&server, 0).await;
    let client = ResendClient::new(&mail_settings(&server)).unwrap();

    let mut controller = FormController::new(FormSettings::default());
    fill(
        &mut controller,
        &[("navn", ""), ("epost", "a@b.c"), ("telefon", "12345678")],
    );

    let outcome = controller.on_submit(&client).await;

    let SubmitOutcome::Rejected(SubmitRejection::Invalid { fields }) = outcome else {
        panic!("expected validation rejection, got {outcome:?}");
    };
    assert!(fields.contains(&("navn".to_string(), ValidationError::Required)));
    assert_eq!(
        controller.state().error_message("navn"),
        Some("Dette feltet er påkrevd")
    );
    assert_eq!(controller.state().error("epost"), None);
    assert!(controller.state().banner().is_none());
    assert_eq!(controller.state().value("navn"), "");
}

#[tokio::test]
async fn accepted_submission_shows_success_and_clears_form() {
    let server = start_email_mock().await;
    mount_email_accepted(&server, 1).await;
    let client = ResendClient::new(&mail_settings(&server)).unwrap();

    let mut controller = FormController::new(FormSettings::default());
    fill(&mut controller, VALID_FIELDS);

    let outcome = controller.on_submit(&client).await;
    assert!(outcome.is_delivered(), "{outcome:?}");

    let state = controller.state();
    let banner = state.banner().unwrap();
    assert_eq!(banner.kind(), BannerKind::Success);
    assert_eq!(banner.text(), SUCCESS_TEXT);
    for (name, _) in VALID_FIELDS {
        assert_eq!(state.value(name), "", "{name} should be cleared");
    }
    assert!(state.submit_control().enabled);
    assert_eq!(state.submit_control().label, SUBMIT_LABEL);
    assert_eq!(controller.phase(), Phase::Idle);
}

#[tokio::test]
async fn failed_delivery_is_masked_as_success() {
    let server = start_email_mock().await;
    mount_email_status(&server, 503, 1).await;
    let client = ResendClient::new(&mail_settings(&server)).unwrap();

    let mut controller = FormController::new(FormSettings::default());
    fill(&mut controller, VALID_FIELDS);

    let outcome = controller.on_submit(&client).await;

    // The visitor sees exactly what a delivered submission shows...
    let banner = controller.state().banner().unwrap();
    assert_eq!(banner.kind(), BannerKind::Success);
    assert_eq!(banner.text(), SUCCESS_TEXT);
    assert_eq!(controller.state().value("navn"), "");
    assert!(controller.state().submit_control().enabled);

    // ...while the caller still learns it was not delivered.
    assert!(!outcome.is_delivered());
    let SubmitOutcome::MaskedFailure(err) = outcome else {
        panic!("expected masked failure, got {outcome:?}");
    };
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn unmasked_failure_keeps_values_for_retry() {
    let server = start_email_mock().await;
    mount_email_status(&server, 500, 2).await;
    let client = ResendClient::new(&mail_settings(&server)).unwrap();

    let mut controller = FormController::new(FormSettings {
        mask_submission_failures: false,
        ..FormSettings::default()
    });
    fill(&mut controller, VALID_FIELDS);

    let outcome = controller.on_submit(&client).await;
    assert!(matches!(
        outcome,
        SubmitOutcome::Failed(SubmissionError::NonSuccessStatus { status: 500, .. })
    ));
    assert_eq!(controller.state().banner().unwrap().kind(), BannerKind::Error);
    assert_eq!(controller.state().value("epost"), "ola@eks.no");

    // Retrying is one more request, not a replay of the first.
    let outcome = controller.on_submit(&client).await;
    assert!(matches!(outcome, SubmitOutcome::Failed(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_masked_too() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let server = start_email_mock().await;
    let mut settings = mail_settings(&server);
    settings.endpoint = format!("http://{addr}/emails");
    let client = ResendClient::new(&settings).unwrap();

    let mut controller = FormController::new(FormSettings::default());
    fill(&mut controller, VALID_FIELDS);

    let outcome = controller.on_submit(&client).await;
    assert!(matches!(
        outcome,
        SubmitOutcome::MaskedFailure(SubmissionError::Transport(_))
    ));
    assert_eq!(controller.state().banner().unwrap().kind(), BannerKind::Success);
}

#[tokio::test]
async fn one_request_per_submit_while_sending() {
    let server = start_email_mock().await;
    mount_email_accepted(&server, 1).await;
    let client = ResendClient::new(&mail_settings(&server)).unwrap();

    let mut controller = FormController::new(FormSettings::default());
    fill(&mut controller, VALID_FIELDS);

    // Host-driven flow: a second press while the first is in flight is refused.
    let snapshot = controller.begin_submit().unwrap();
    assert_eq!(controller.begin_submit(), Err(SubmitRejection::Busy));
    assert!(!controller.state().submit_control().enabled);

    let result = formflow_providers::EmailDispatcher::send(&client, &snapshot).await;
    let outcome = controller.finish_submit(result, Instant::now());
    assert!(outcome.is_delivered());
}

#[tokio::test]
async fn banner_hides_after_configured_duration() {
    let server = start_email_mock().await;
    mount_email_accepted(&server, 1).await;
    let client = ResendClient::new(&mail_settings(&server)).unwrap();

    let mut controller = FormController::new(FormSettings::default());
    fill(&mut controller, VALID_FIELDS);
    controller.on_submit(&client).await;

    let shown_at = controller.state().banner().unwrap().shown_at();
    controller.tick(shown_at + Duration::from_secs(4));
    assert!(controller.state().is_banner_visible());

    controller.tick(shown_at + Duration::from_secs(5));
    assert!(!controller.state().is_banner_visible());
}

#[tokio::test]
async fn delivered_email_escapes_visitor_input() {
    let server = start_email_mock().await;
    mount_email_accepted(&server, 1).await;
    let client = ResendClient::new(&mail_settings(&server)).unwrap();

    let mut controller = FormController::new(FormSettings::default());
    fill(&mut controller, VALID_FIELDS);
    controller.on_field_input("beskrivelse", "<script>alert('x')</script>");
    controller.on_field_input("befaring", "on");
    controller.on_submit(&client).await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = requests[0].body_json().unwrap();

    assert_eq!(body["from"], "nettside@eks.no");
    assert_eq!(body["to"], "post@eks.no");
    assert_eq!(body["reply_to"], "ola@eks.no");
    assert_eq!(body["subject"], "Ny forespørsel: Kjøkken - Ola");

    let html = body["html"].as_str().unwrap();
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt;"));
    assert!(html.contains("<p><strong>Ønsker befaring:</strong> Ja</p>"));

    let auth = requests[0].headers.get("authorization").unwrap();
    assert_eq!(auth.to_str().unwrap(), "Bearer re_integration_secret");
}
