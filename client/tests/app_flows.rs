//! End-to-end flows of the controller against the in-memory fixture API.
//!
//! Each test wires the real adapters except the network: routing, fetching,
//! failure reporting and session handling run as they would in the binary.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::rstest;

use client::controller::{PageView, View};
use client::domain::ports::{ImmediateViewEffects, NoOpMetrics, UserApi};
use client::domain::{
    ErrorKey, LoginCredentials, Notification, NotificationAction, NotificationKind, PatientId,
    PatientPatch, RequestState, Route,
};
use client::outbound::fixture::{FixtureApi, MockParams};
use client::outbound::processing::ChronologicalProcessor;
use client::{AppController, AppPorts, ControllerOptions};

struct App {
    controller: AppController,
    fixture: Arc<FixtureApi>,
}

fn app(query: &str) -> App {
    let fixture = Arc::new(FixtureApi::demo(MockParams::parse(query)).expect("demo seed"));
    let ports = AppPorts {
        user: fixture.clone(),
        patient: fixture.clone(),
        patient_data: fixture.clone(),
        team: fixture.clone(),
        errors: fixture.clone(),
        metrics: Arc::new(NoOpMetrics),
        processor: Arc::new(ChronologicalProcessor),
        effects: Arc::new(ImmediateViewEffects),
        clock: Arc::new(DefaultClock),
    };
    let controller = AppController::new(
        ports,
        Arc::new(client::domain::ErrorStore::new()),
        ControllerOptions::default(),
    );
    App {
        controller,
        fixture,
    }
}

fn demo_id() -> PatientId {
    PatientId::new("demo-patient").expect("valid id")
}

#[rstest]
#[tokio::test]
async fn signed_out_visitors_land_on_login_then_reach_patients() {
    let app = app("");

    let route = app.controller.start("/patients/demo-patient/data").await;
    assert_eq!(route, Route::Login);
    assert_eq!(app.controller.view().page, PageView::Login);

    let credentials =
        LoginCredentials::try_from_parts("demo@example.org", "demo").expect("credentials");
    app.controller
        .login(&credentials)
        .await
        .expect("login succeeds");

    let state = app.controller.state();
    assert_eq!(state.route, Some(Route::Patients));
    assert_eq!(state.user().map(|user| user.full_name.as_str()), Some("Demo User"));
    assert!(matches!(&state.patients, RequestState::Loaded(patients) if patients.len() == 2));
}

#[rstest]
#[tokio::test]
async fn data_page_merges_notes_into_the_timeline() {
    let app = app("auth.skip");

    let route = app.controller.start("/patients/demo-patient/data").await;
    assert_eq!(route, Route::PatientData(demo_id()));

    let View { page, navbar, .. } = app.controller.view();
    let PageView::PatientData {
        patient_data,
        is_user_patient,
        ..
    } = page
    else {
        panic!("expected the data page, got {page:?}");
    };
    assert!(is_user_patient);
    assert!(navbar.is_some_and(|navbar| navbar.patient.is_some()));

    let processed = patient_data.value().expect("data loaded");
    let ids: Vec<_> = processed.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["d-4", "d-1", "d-2", "m-1", "d-3", "d-5", "d-6"]);
    assert_eq!(processed.counts_by_type.get("message"), Some(&1));
    assert_eq!(processed.counts_by_type.get("cbg"), Some(&2));
}

#[rstest]
#[tokio::test]
async fn missing_patients_redirect_quietly() {
    let app = app("auth.skip");

    let route = app.controller.start("/patients/missing").await;

    assert_eq!(route, Route::Patients);
    let state = app.controller.state();
    assert!(state.notification.is_none());
    assert!(app.controller.error_store().current().is_none());
    assert!(app.fixture.error_reports().is_empty());
}

#[rstest]
#[tokio::test]
async fn server_failures_are_surfaced_and_reported() {
    let app = app("auth.skip&api.patient.getall.error=500");

    app.controller.start("/patients").await;

    let notification = app.controller.state().notification.expect("notification");
    assert_eq!(notification.kind, NotificationKind::Error);
    assert!(
        notification
            .detail
            .as_deref()
            .is_some_and(|detail| detail
                .starts_with("Original error message: Something went wrong while fetching care teams"))
    );
    assert_eq!(
        app.controller.error_store().current().map(|record| record.key),
        Some(ErrorKey::FailedGetPatients)
    );
    let reports = app.fixture.error_reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(
        reports.first().map(|report| report.context.as_str()),
        Some("Something went wrong while fetching care teams")
    );
}

#[rstest]
#[tokio::test]
async fn expired_sessions_offer_to_log_back_in() {
    let app = app("auth.skip&api.user.get.error=401");

    app.controller.start("/patients").await;

    let notification = app.controller.state().notification.expect("notification");
    assert_eq!(notification, Notification::session_expired());
    assert_eq!(notification.action, Some(NotificationAction::LogBackIn));

    app.controller.log_back_in().await;

    let state = app.controller.state();
    assert!(!state.authenticated);
    assert_eq!(state.route, Some(Route::Login));
    assert!(state.notification.is_none());
    assert!(!app.fixture.is_authenticated());
}

#[rstest]
#[tokio::test]
async fn profile_edits_reach_the_backend() {
    let app = app("auth.skip");
    app.controller.start("/patients/demo-patient/edit").await;

    let saved = app
        .controller
        .update_patient(&PatientPatch {
            about: Some("Switched to a new sensor.".to_owned()),
            ..PatientPatch::default()
        })
        .await
        .expect("update succeeds");

    assert_eq!(saved.about.as_deref(), Some("Switched to a new sensor."));
    assert_eq!(app.controller.state().patient(), Some(&saved));
}

#[rstest]
#[tokio::test]
async fn logout_closes_the_fixture_session() {
    let app = app("auth.skip");
    app.controller.start("/profile").await;

    app.controller.logout().await;

    let state = app.controller.state();
    assert!(!state.authenticated);
    assert_eq!(state.route, Some(Route::Login));
    assert_eq!(state.user, RequestState::Idle);
    assert!(!app.fixture.is_authenticated());
    assert!(!state.logging_out);
}
