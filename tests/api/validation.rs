use std::time::Duration;

use canopy_profile::domain::{FormField, SubmissionOutcome};
use canopy_profile::errors::Error;
use canopy_profile::workflow::{BUSY_FAILSAFE_WINDOW, PASSWORD_MISMATCH};
use claims::{assert_err, assert_none, assert_some_eq};
use wiremock::matchers::method;
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{let_debounce_settle, spawn_workflow, spawn_workflow_without_session};

/// Lets spawned timer tasks register their sleeps and run once woken.
async fn run_pending_tasks() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn mismatched_pair_sets_the_error_after_the_quiet_period() {
    let app = spawn_workflow().await;

    app.workflow.update_field(FormField::NewPassword, "abc".into());
    app.workflow
        .update_field(FormField::NewPasswordCheck, "xyz".into());
    run_pending_tasks().await;
    assert_none!(app.workflow.validation_error());

    tokio::time::advance(Duration::from_millis(450)).await;
    run_pending_tasks().await;
    assert_none!(app.workflow.validation_error());

    tokio::time::advance(Duration::from_millis(100)).await;
    run_pending_tasks().await;
    assert_some_eq!(app.workflow.validation_error(), PASSWORD_MISMATCH.to_string());
}

#[tokio::test(start_paused = true)]
async fn rapid_edits_within_the_quiet_period_defer_the_check() {
    let app = spawn_workflow().await;

    app.workflow.update_field(FormField::NewPassword, "abc".into());
    run_pending_tasks().await;
    tokio::time::advance(Duration::from_millis(400)).await;
    run_pending_tasks().await;

    // A keystroke 400ms in restarts the timer.
    app.workflow
        .update_field(FormField::NewPasswordCheck, "ab".into());
    run_pending_tasks().await;
    tokio::time::advance(Duration::from_millis(400)).await;
    run_pending_tasks().await;
    assert_none!(app.workflow.validation_error());

    tokio::time::advance(Duration::from_millis(150)).await;
    run_pending_tasks().await;
    assert_some_eq!(app.workflow.validation_error(), PASSWORD_MISMATCH.to_string());
}

#[tokio::test(start_paused = true)]
async fn matching_pair_clears_a_previous_error() {
    let app = spawn_workflow().await;

    app.workflow.update_field(FormField::NewPassword, "abc".into());
    app.workflow
        .update_field(FormField::NewPasswordCheck, "xyz".into());
    run_pending_tasks().await;
    tokio::time::advance(Duration::from_millis(550)).await;
    run_pending_tasks().await;
    assert_some_eq!(app.workflow.validation_error(), PASSWORD_MISMATCH.to_string());

    app.workflow
        .update_field(FormField::NewPasswordCheck, "abc".into());
    run_pending_tasks().await;
    tokio::time::advance(Duration::from_millis(550)).await;
    run_pending_tasks().await;
    assert_none!(app.workflow.validation_error());
}

#[tokio::test]
async fn submit_is_rejected_until_all_fields_are_present() {
    let app = spawn_workflow().await;

    app.workflow.update_field(FormField::CurrentPassword, "old1".into());
    app.workflow.update_field(FormField::NewPassword, "new1".into());
    assert!(!app.workflow.can_submit());

    let err = assert_err!(app.workflow.submit().await);
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(app.workflow.outcome(), SubmissionOutcome::Idle);
}

#[tokio::test]
async fn submit_is_rejected_while_the_mismatch_error_is_set() {
    let app = spawn_workflow().await;

    app.fill_form("old1", "abc", "xyz");
    let_debounce_settle().await;
    assert_some_eq!(app.workflow.validation_error(), PASSWORD_MISMATCH.to_string());
    assert!(!app.workflow.can_submit());

    let err = assert_err!(app.workflow.submit().await);
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test(start_paused = true)]
async fn failsafe_clears_busy_while_the_call_is_outstanding() {
    let app = spawn_workflow().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3600)))
        .mount(&app.identity_server)
        .await;

    app.fill_form("old1", "new1", "new1");
    let workflow = app.workflow.clone();
    let submission = tokio::spawn(async move {
        let _ = workflow.submit().await;
    });
    run_pending_tasks().await;
    assert!(app.workflow.busy());

    tokio::time::sleep(BUSY_FAILSAFE_WINDOW + Duration::from_millis(100)).await;
    // The request has not resolved, yet the UI is no longer stuck.
    assert!(!app.workflow.busy());
    assert_eq!(app.workflow.outcome(), SubmissionOutcome::Idle);

    submission.abort();
}

#[tokio::test(start_paused = true)]
async fn failure_outcome_clears_after_the_failsafe_window() {
    let app = spawn_workflow_without_session().await;

    app.fill_form("old1", "new1", "new1");
    let err = assert_err!(app.workflow.submit().await);
    assert!(matches!(err, Error::SessionMissing));
    assert!(matches!(app.workflow.outcome(), SubmissionOutcome::Failure(_)));

    tokio::time::sleep(BUSY_FAILSAFE_WINDOW + Duration::from_millis(100)).await;
    run_pending_tasks().await;
    assert_eq!(app.workflow.outcome(), SubmissionOutcome::Idle);
}