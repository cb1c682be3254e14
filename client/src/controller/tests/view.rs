//! Overlay, navbar and page selection.

use rstest::rstest;

use super::{Harness, member, owner, patient, patient_id};
use crate::controller::{Overlay, PageView};
use crate::domain::{ApiError, Page, RequestState, Route};

#[rstest]
#[case(true, true, Some(Overlay::Logout))]
#[case(false, true, Some(Overlay::AcceptTerms))]
#[case(false, false, None)]
fn logout_overlay_takes_precedence(
    #[case] logging_out: bool,
    #[case] terms: bool,
    #[case] expected: Option<Overlay>,
) {
    let app = Harness::new(true).build();
    app.controller.commit(|state| {
        state.logging_out = logging_out;
        state.showing_accept_terms = terms;
    });

    assert_eq!(app.controller.view().overlay, expected);
}

#[rstest]
fn navbar_is_hidden_when_signed_out() {
    let app = Harness::new(false).build();
    app.controller.commit(|state| state.page = Some(Page::Login));

    let view = app.controller.view();

    assert!(view.navbar.is_none());
    assert_eq!(view.page, PageView::Login);
}

#[rstest]
#[case(Page::Patients, false)]
#[case(Page::Profile, false)]
#[case(Page::Patient(patient_id()), true)]
#[case(Page::PatientData(patient_id()), true)]
fn navbar_shows_patient_only_on_patient_pages(#[case] page: Page, #[case] shown: bool) {
    let mut harness = Harness::new(true);
    harness.options.version = Some("0.1.0".to_owned());
    let app = harness.build();
    app.controller.commit(|state| {
        state.page = Some(page);
        state.user = RequestState::Loaded(owner());
        state.patient = RequestState::Loaded(patient());
    });

    let navbar = app.controller.view().navbar.expect("navbar shown");

    assert_eq!(navbar.version.as_deref(), Some("0.1.0"));
    assert_eq!(navbar.patient.is_some(), shown);
    assert_eq!(navbar.is_user_patient, shown);
}

#[rstest]
fn pages_wait_while_the_patient_loads() {
    let app = Harness::new(true).build();
    app.controller.commit(|state| {
        state.page = Some(Page::Patient(patient_id()));
        state.patient = RequestState::Loading;
    });
    assert!(app.controller.view_redirect().is_none());

    app.controller
        .commit(|state| state.patient = RequestState::Failed(ApiError::not_found("gone")));

    assert_eq!(app.controller.view_redirect(), Some(Route::Patients));
    assert_eq!(
        app.controller.view().page,
        PageView::Redirect {
            to: Route::Patients
        }
    );
}

#[rstest]
fn edit_page_without_patient_falls_back_to_list() {
    let app = Harness::new(true).build();
    app.controller.commit(|state| {
        state.page = Some(Page::PatientEdit(patient_id()));
        state.user = RequestState::Loaded(owner());
        state.patient = RequestState::Failed(ApiError::not_found("gone"));
    });

    assert_eq!(app.controller.view_redirect(), Some(Route::Patients));
}

#[rstest]
fn edit_page_waits_for_the_account_before_redirecting() {
    let app = Harness::new(true).build();
    app.controller.commit(|state| {
        state.page = Some(Page::PatientEdit(patient_id()));
        state.patient = RequestState::Loaded(patient());
    });

    assert_eq!(app.controller.view_redirect(), None);

    app.controller
        .commit(|state| state.user = RequestState::Loaded(member()));

    assert_eq!(
        app.controller.view_redirect(),
        Some(Route::Patient(patient_id()))
    );
}

#[rstest]
fn request_errors_surface_in_the_view_until_dismissed() {
    let app = Harness::new(true).build();
    app.store.dispatch(crate::domain::RequestEvent::FailedGetPatients {
        error: ApiError::internal("boom"),
    });
    assert!(app.controller.view().request_error.is_some());

    app.controller.dismiss_request_error();

    assert!(app.controller.view().request_error.is_none());
}

#[rstest]
fn view_serialises_for_renderers() {
    let app = Harness::new(true).build();
    app.controller.commit(|state| {
        state.page = Some(Page::Profile);
        state.user = RequestState::Loaded(owner());
    });

    let json = serde_json::to_value(app.controller.view()).expect("serialise view");

    assert_eq!(json["page"]["page"], "profile");
    assert_eq!(json["page"]["user"]["state"], "loaded");
    assert_eq!(json["navbar"]["user"]["value"]["fullName"], "Demo Member");
}
