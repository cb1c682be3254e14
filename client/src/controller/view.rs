//! View selection: what a renderer would draw for the current state.

use serde::Serialize;

use crate::domain::{
    ErrorRecord, Notification, Page, Patient, ProcessedData, RequestState, Route, RoutePolicy,
    User,
};

use super::{AppController, AppState, ControllerOptions};

/// Full-screen overlay shown above the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Overlay {
    /// Shown while a logout is in flight.
    Logout,
    /// Terms of use awaiting acceptance after signup.
    AcceptTerms,
}

/// Navigation bar contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Navbar {
    /// Build version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Signed-in account.
    pub user: RequestState<User>,
    /// Present only on `patients/...` pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient: Option<RequestState<Patient>>,
    /// Whether the account owns the patient shown.
    pub is_user_patient: bool,
}

/// Page body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageView {
    /// No route has been handled yet.
    Blank,
    /// The state calls for another route; the renderer draws nothing.
    Redirect {
        /// Route to navigate to.
        to: Route,
    },
    /// Login form.
    Login,
    /// Signup form.
    Signup,
    /// Account settings.
    Profile {
        /// Account being edited.
        user: RequestState<User>,
    },
    /// Patients the account can see.
    Patients {
        /// Signed-in account.
        user: RequestState<User>,
        /// Visible patients.
        patients: RequestState<Vec<Patient>>,
    },
    /// One patient profile.
    Patient {
        /// Signed-in account.
        user: RequestState<User>,
        /// Profile shown.
        patient: RequestState<Patient>,
    },
    /// Creation form, prefilled with the account's full name.
    PatientNew {
        /// Name to prefill.
        #[serde(rename = "fullName", skip_serializing_if = "Option::is_none")]
        full_name: Option<String>,
        /// Whether the account is still loading.
        loading: bool,
    },
    /// Profile edit form.
    PatientEdit {
        /// Profile being edited.
        patient: RequestState<Patient>,
    },
    /// Timeline of device data and notes.
    PatientData {
        /// Profile whose data is shown.
        patient: RequestState<Patient>,
        /// Merged and processed records.
        #[serde(rename = "patientData")]
        patient_data: RequestState<ProcessedData>,
        /// Whether the account owns the profile.
        #[serde(rename = "isUserPatient")]
        is_user_patient: bool,
    },
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    /// Overlay above the page, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<Overlay>,
    /// Navigation bar; hidden when signed out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navbar: Option<Navbar>,
    /// Visible banner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
    /// Latest unhandled request failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_error: Option<ErrorRecord>,
    /// Page body.
    pub page: PageView,
}

impl AppController {
    /// Select the view for the current state.
    pub fn view(&self) -> View {
        let request_error = self.error_store.current();
        self.read(|state| View {
            overlay: select_overlay(state),
            navbar: select_navbar(state, &self.options),
            notification: state.notification.clone(),
            request_error,
            page: select_page(state, &self.options.policy),
        })
    }

    /// Route the current view asks to be replaced with, if any.
    pub fn view_redirect(&self) -> Option<Route> {
        self.read(|state| redirect_for(state, &self.options.policy))
    }
}

fn select_overlay(state: &AppState) -> Option<Overlay> {
    if state.logging_out {
        Some(Overlay::Logout)
    } else if state.showing_accept_terms {
        Some(Overlay::AcceptTerms)
    } else {
        None
    }
}

fn select_navbar(state: &AppState, options: &ControllerOptions) -> Option<Navbar> {
    if !state.authenticated {
        return None;
    }
    let patient_visible = state.page.as_ref().is_some_and(Page::is_patient_scoped);
    Some(Navbar {
        version: options.version.clone(),
        user: state.user.clone(),
        patient: patient_visible.then(|| state.patient.clone()),
        is_user_patient: patient_visible && state.is_user_patient(),
    })
}

fn select_page(state: &AppState, policy: &RoutePolicy) -> PageView {
    if let Some(to) = redirect_for(state, policy) {
        return PageView::Redirect { to };
    }
    let Some(page) = &state.page else {
        return PageView::Blank;
    };
    match page {
        Page::Login => PageView::Login,
        Page::Signup => PageView::Signup,
        Page::Profile => PageView::Profile {
            user: state.user.clone(),
        },
        Page::Patients => PageView::Patients {
            user: state.user.clone(),
            patients: state.patients.clone(),
        },
        Page::Patient(_) => PageView::Patient {
            user: state.user.clone(),
            patient: state.patient.clone(),
        },
        Page::PatientNew => PageView::PatientNew {
            full_name: state.user().map(|user| user.full_name.clone()),
            loading: state.user.is_loading(),
        },
        Page::PatientEdit(_) => PageView::PatientEdit {
            patient: state.patient.clone(),
        },
        Page::PatientData(_) => PageView::PatientData {
            patient: state.patient.clone(),
            patient_data: state.patient_data.clone(),
            is_user_patient: state.is_user_patient(),
        },
    }
}

fn redirect_for(state: &AppState, policy: &RoutePolicy) -> Option<Route> {
    match state.page.as_ref()? {
        Page::Patient(_) | Page::PatientData(_) => {
            let missing = !state.patient.is_loading() && state.patient().is_none();
            missing.then(|| policy.default_route(true).clone())
        }
        Page::PatientNew => {
            if state.user.is_loading() {
                return None;
            }
            state.user()?.patient_id().cloned().map(Route::Patient)
        }
        Page::PatientEdit(_) => {
            let settled = state.user.is_settled() && state.patient.is_settled();
            if !settled || state.is_user_patient() {
                return None;
            }
            Some(
                state
                    .patient()
                    .map_or(Route::Patients, |patient| Route::Patient(patient.id.clone())),
            )
        }
        Page::Login | Page::Signup | Page::Profile | Page::Patients => None,
    }
}
