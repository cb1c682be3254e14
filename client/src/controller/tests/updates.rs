//! Optimistic updates, rollback and validation.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use rstest::rstest;

use super::{Harness, member, patient, patient_id};
use crate::domain::{
    ApiError, ErrorKey, MetricEvent, NewPatient, PatientId, PatientPatch, RequestState, User,
    UserPatch, UserUpdate,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[rstest]
#[tokio::test]
async fn account_update_commits_optimistically_then_takes_server_copy() {
    let mut harness = Harness::new(true);
    harness
        .user
        .expect_put()
        .withf(|update: &UserUpdate| {
            update.username.is_none()
                && update.full_name == "Optimistic Name"
                && update.password.is_none()
        })
        .times(1)
        .returning(|_| {
            Ok(User {
                full_name: "Server Name".to_owned(),
                ..member()
            })
        });
    let app = harness.build();
    app.controller
        .commit(|state| state.user = RequestState::Loaded(member()));

    let seen = Arc::new(Mutex::new(Vec::new()));
    let reader = Arc::clone(&app.controller);
    let sink = Arc::clone(&seen);
    app.controller.subscribe(move || {
        if let Some(user) = reader.state().user() {
            sink.lock().expect("sink lock").push(user.full_name.clone());
        }
    });

    let saved = app
        .controller
        .update_user(&UserPatch::full_name("Optimistic Name"))
        .await
        .expect("update succeeds");

    assert_eq!(saved.full_name, "Server Name");
    assert_eq!(
        *seen.lock().expect("sink lock"),
        vec!["Optimistic Name".to_owned(), "Server Name".to_owned()]
    );
    assert_eq!(app.metrics.events(), vec![MetricEvent::UpdatedAccount]);
}

#[rstest]
#[tokio::test]
async fn changed_username_and_password_are_sent() {
    let mut harness = Harness::new(true);
    harness
        .user
        .expect_put()
        .withf(|update: &UserUpdate| {
            update.username.as_deref() == Some("new@example.org")
                && update.password.as_ref().map(|p| p.as_str()) == Some("correct horse")
        })
        .times(1)
        .returning(|_| Ok(member()));
    let app = harness.build();
    app.controller
        .commit(|state| state.user = RequestState::Loaded(member()));

    let patch = UserPatch::username("new@example.org").with_password("correct horse");
    app.controller
        .update_user(&patch)
        .await
        .expect("update succeeds");
}

#[rstest]
#[tokio::test]
async fn failed_account_update_restores_snapshot() {
    let mut harness = Harness::new(true);
    harness
        .user
        .expect_put()
        .times(1)
        .returning(|_| Err(ApiError::conflict("username taken")));
    let app = harness.build();
    app.controller
        .commit(|state| state.user = RequestState::Loaded(member()));

    let result = app
        .controller
        .update_user(&UserPatch::username("taken@example.org"))
        .await;

    assert!(result.is_err());
    let state = app.controller.state();
    assert_eq!(state.user, RequestState::Loaded(member()));
    assert!(state.notification.is_some());
    assert_eq!(
        app.store.current().map(|record| record.key),
        Some(ErrorKey::FailedUpdateUser)
    );
    assert!(app.metrics.events().is_empty());
}

#[rstest]
#[tokio::test]
async fn updates_require_a_loaded_entity() {
    let mut harness = Harness::new(true);
    harness.user.expect_put().never();
    harness.patient.expect_put().never();
    let app = harness.build();

    assert!(app
        .controller
        .update_user(&UserPatch::full_name("Nobody"))
        .await
        .is_err());
    assert!(app
        .controller
        .update_patient(&PatientPatch::default())
        .await
        .is_err());
    assert!(app.controller.state().notification.is_none());
}

#[rstest]
#[tokio::test]
async fn profile_update_sends_attributes_and_keeps_server_copy() {
    let mut harness = Harness::new(true);
    harness
        .patient
        .expect_put()
        .withf(|id: &PatientId, attributes: &NewPatient| {
            id.as_str() == "abc123" && attributes.about.as_deref() == Some("Loves hiking")
        })
        .times(1)
        .returning(|id, attributes| Ok(attributes.clone().into_patient(id.clone())));
    let app = harness.build();
    app.controller
        .commit(|state| state.patient = RequestState::Loaded(patient()));

    let patch = PatientPatch {
        about: Some("Loves hiking".to_owned()),
        ..PatientPatch::default()
    };
    let saved = app
        .controller
        .update_patient(&patch)
        .await
        .expect("update succeeds");

    assert_eq!(saved.id, patient_id());
    assert_eq!(app.controller.state().patient, RequestState::Loaded(saved));
    assert_eq!(app.metrics.events(), vec![MetricEvent::UpdatedProfile]);
}

#[rstest]
#[tokio::test]
async fn failed_profile_update_restores_snapshot() {
    let mut harness = Harness::new(true);
    harness
        .patient
        .expect_put()
        .times(1)
        .returning(|_, _| Err(ApiError::internal("write failed")));
    let app = harness.build();
    app.controller
        .commit(|state| state.patient = RequestState::Loaded(patient()));

    let patch = PatientPatch {
        full_name: Some("Renamed".to_owned()),
        ..PatientPatch::default()
    };
    assert!(app.controller.update_patient(&patch).await.is_err());

    assert_eq!(app.controller.state().patient, RequestState::Loaded(patient()));
    let record = app.store.current().expect("error recorded");
    assert_eq!(record.key, ErrorKey::FailedUpdatePatient);
}

#[rstest]
fn user_validation_merges_patch_into_loaded_account() {
    let app = Harness::new(true).build();
    app.controller
        .commit(|state| state.user = RequestState::Loaded(member()));

    assert!(app.controller.validate_user(&UserPatch::full_name("Renamed")).is_ok());

    let errors = app
        .controller
        .validate_user(&UserPatch::full_name(" ").with_password("short"))
        .expect_err("invalid patch");
    assert_eq!(errors.get("fullName"), Some("Full name is required."));
    assert!(errors.get("password").is_some());
}

#[rstest]
fn signup_form_validates_against_an_empty_account() {
    let app = Harness::new(false).build();

    let errors = app
        .controller
        .validate_user(&UserPatch::default())
        .expect_err("empty form");

    assert_eq!(errors.get("username"), Some("Email address is required."));
}

#[rstest]
#[case(date(2010, 1, 1), None, true)]
#[case(date(2026, 10, 17), None, false)]
#[case(date(2010, 1, 1), Some(date(2009, 1, 1)), false)]
#[case(date(2010, 1, 1), Some(date(2026, 10, 16)), true)]
fn patient_validation_uses_the_injected_clock(
    #[case] birthday: NaiveDate,
    #[case] diagnosis_date: Option<NaiveDate>,
    #[case] valid: bool,
) {
    let app = Harness::new(true).build();
    let draft = NewPatient {
        full_name: "Jamie Doe".to_owned(),
        birthday,
        diagnosis_date,
        about: None,
    };

    assert_eq!(app.controller.validate_patient(&draft).is_ok(), valid);
}
