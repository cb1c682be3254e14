//! Route dispatch and page handlers.

use tracing::{debug, warn};

use crate::domain::{MetricEvent, Page, PatientId, RequestState, Route};

use super::AppController;

/// Upper bound on redirects followed by one navigation.
const MAX_REDIRECTS: usize = 8;

impl AppController {
    /// Navigate to `path` and return the route the application settled on.
    ///
    /// Auth gating, the `/` redirect and view redirects (for example a
    /// missing patient) are followed until the view settles.
    pub async fn navigate(&self, path: &str) -> Route {
        let mut target = match Route::parse(path) {
            Ok(route) => route,
            Err(err) => {
                let fallback = self.default_route();
                warn!(error = %err, fallback = %fallback, "unknown route");
                fallback
            }
        };

        for _ in 0..MAX_REDIRECTS {
            let authenticated = self.is_authenticated();
            if let Some(redirect) = self.options.policy.redirect_for(&target, authenticated) {
                debug!(from = %target, to = %redirect, authenticated, "auth redirect");
                target = redirect;
                continue;
            }

            let current = target.clone();
            self.commit(|state| state.route = Some(current));
            if let Some(redirect) = self.dispatch_route(&target).await {
                debug!(from = %target, to = %redirect, "route redirect");
                target = redirect;
                continue;
            }

            match self.view_redirect() {
                Some(redirect) => {
                    debug!(from = %target, to = %redirect, "view redirect");
                    target = redirect;
                }
                None => return target,
            }
        }

        warn!(route = %target, "redirect limit reached");
        target
    }

    /// Landing route for the current auth state.
    pub fn default_route(&self) -> Route {
        self.options
            .policy
            .default_route(self.is_authenticated())
            .clone()
    }

    async fn dispatch_route(&self, route: &Route) -> Option<Route> {
        match route {
            Route::Root => return Some(self.options.policy.default_route(true).clone()),
            Route::Login => self.show_login(),
            Route::Signup => self.show_signup(),
            Route::Profile => self.show_profile(),
            Route::Patients => self.show_patients().await,
            Route::PatientNew => self.show_patient_new(),
            Route::Patient(id) => self.show_patient(id).await,
            Route::PatientEdit(id) => self.show_patient_edit(id).await,
            Route::PatientData(id) => self.show_patient_data(id).await,
        }
        None
    }

    /// Show the login form.
    pub fn show_login(&self) {
        self.commit(|state| state.page = Some(Page::Login));
    }

    /// Show the signup form.
    pub fn show_signup(&self) {
        self.commit(|state| state.page = Some(Page::Signup));
    }

    /// Show the account settings page.
    pub fn show_profile(&self) {
        self.commit(|state| state.page = Some(Page::Profile));
        self.ports.metrics.track(MetricEvent::ViewedAccountEdit);
    }

    /// Show the patient list and load it.
    pub async fn show_patients(&self) {
        self.commit(|state| state.page = Some(Page::Patients));
        self.ports.metrics.track(MetricEvent::ViewedCareTeamList);
        self.fetch_patients().await;
    }

    /// Show one patient. The previous profile is cleared first so it is
    /// never displayed under the new route.
    pub async fn show_patient(&self, patient_id: &PatientId) {
        let page = Page::Patient(patient_id.clone());
        self.commit(|state| {
            state.page = Some(page);
            state.patient = RequestState::Loading;
        });
        self.ports.metrics.track(MetricEvent::ViewedProfile);
        self.fetch_patient(patient_id).await;
    }

    /// Show the profile creation form.
    pub fn show_patient_new(&self) {
        self.commit(|state| {
            state.page = Some(Page::PatientNew);
            state.patient = RequestState::Idle;
        });
        self.ports.metrics.track(MetricEvent::ViewedProfileCreate);
    }

    /// Show the edit form for a profile and load it.
    pub async fn show_patient_edit(&self, patient_id: &PatientId) {
        let page = Page::PatientEdit(patient_id.clone());
        self.commit(|state| {
            state.page = Some(page);
            state.patient = RequestState::Loading;
        });
        self.ports.metrics.track(MetricEvent::ViewedProfileEdit);
        self.fetch_patient(patient_id).await;
    }

    /// Show the data timeline: load the profile, then its data.
    pub async fn show_patient_data(&self, patient_id: &PatientId) {
        let page = Page::PatientData(patient_id.clone());
        self.commit(|state| {
            state.page = Some(page);
            state.patient = RequestState::Loading;
            state.patient_data = RequestState::Loading;
        });
        self.ports.metrics.track(MetricEvent::ViewedData);

        match self.fetch_patient(patient_id).await {
            Some(patient) => self.fetch_patient_data(&patient.id).await,
            None => self.commit(|state| state.patient_data = RequestState::Idle),
        }
    }
}
