//! Controller-owned UI state.

use serde::Serialize;

use crate::domain::{Notification, Page, Patient, ProcessedData, RequestState, Route, User};

/// Everything the views render from.
///
/// Entity slots use [`RequestState`] so "still loading" and "finished
/// without a value" are distinct states.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Whether a session is open.
    pub authenticated: bool,
    /// Route last handled.
    pub route: Option<Route>,
    /// Page tag set by the route handler.
    pub page: Option<Page>,
    /// Signed-in account.
    pub user: RequestState<User>,
    /// Patients the account can see.
    pub patients: RequestState<Vec<Patient>>,
    /// Patient on screen.
    pub patient: RequestState<Patient>,
    /// Processed timeline for that patient.
    pub patient_data: RequestState<ProcessedData>,
    /// Single notification slot.
    pub notification: Option<Notification>,
    /// Set while a logout is in flight.
    pub logging_out: bool,
    /// Set while the terms overlay is up.
    pub showing_accept_terms: bool,
}

impl AppState {
    /// Initial state for a session that may already be open.
    pub fn new(authenticated: bool) -> Self {
        Self {
            authenticated,
            ..Self::default()
        }
    }

    /// The loaded user, if any.
    pub fn user(&self) -> Option<&User> {
        self.user.value()
    }

    /// The loaded patient, if any.
    pub fn patient(&self) -> Option<&Patient> {
        self.patient.value()
    }

    /// Whether the loaded user manages the loaded patient.
    pub fn is_user_patient(&self) -> bool {
        match (self.user(), self.patient()) {
            (Some(user), Some(patient)) => user.owns_patient(patient),
            _ => false,
        }
    }

    /// Drop every entity tied to the signed-in account.
    pub fn clear_user_data(&mut self) {
        self.user = RequestState::Idle;
        self.patients = RequestState::Idle;
        self.patient = RequestState::Idle;
        self.patient_data = RequestState::Idle;
    }

    /// Names of the fields that differ from `previous`.
    pub fn changed_fields(&self, previous: &Self) -> Vec<&'static str> {
        let mut changed = Vec::new();
        let mut check = |name: &'static str, differs: bool| {
            if differs {
                changed.push(name);
            }
        };
        check("authenticated", self.authenticated != previous.authenticated);
        check("route", self.route != previous.route);
        check("page", self.page != previous.page);
        check("user", self.user != previous.user);
        check("patients", self.patients != previous.patients);
        check("patient", self.patient != previous.patient);
        check("patientData", self.patient_data != previous.patient_data);
        check("notification", self.notification != previous.notification);
        check("loggingOut", self.logging_out != previous.logging_out);
        check(
            "showingAcceptTerms",
            self.showing_accept_terms != previous.showing_accept_terms,
        );
        changed
    }
}
