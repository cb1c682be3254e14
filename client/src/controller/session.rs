//! Login, signup, logout and the other user-initiated actions.

use futures_util::future::join;
use tracing::{debug, info};

use crate::domain::{
    ApiResult, LoginCredentials, Message, MetricEvent, NewMessage, NewPatient, Page, Patient,
    RequestEvent, RequestState, Route, SignupDetails, User,
};

use super::AppController;

impl AppController {
    /// Open a session, then load the account and land on the default page.
    ///
    /// Failures are returned for inline display on the login form.
    pub async fn login(&self, credentials: &LoginCredentials) -> ApiResult<()> {
        if let Err(error) = self.ports.user.login(credentials).await {
            self.error_store.dispatch(RequestEvent::FailedLogin {
                error: error.clone(),
            });
            return Err(error);
        }

        info!(remember = credentials.remember(), "logged in");
        self.commit(|state| state.authenticated = true);
        let landing = self.options.policy.default_route(true).path();
        join(self.fetch_user(), self.navigate(&landing)).await;
        self.ports.metrics.track(MetricEvent::LoggedIn);
        Ok(())
    }

    /// Create an account and enter the application with it.
    pub async fn signup(&self, details: &SignupDetails) -> ApiResult<User> {
        let user = match self.ports.user.signup(details).await {
            Ok(user) => user,
            Err(error) => {
                self.error_store.dispatch(RequestEvent::FailedSignup {
                    error: error.clone(),
                });
                return Err(error);
            }
        };

        let show_terms = self.options.show_accept_terms;
        let loaded = user.clone();
        self.commit(|state| {
            state.authenticated = true;
            state.user = RequestState::Loaded(loaded);
            state.showing_accept_terms = show_terms;
        });
        let landing = self.options.policy.default_route(true).path();
        self.navigate(&landing).await;
        self.ports.metrics.track(MetricEvent::SignedUp);
        Ok(user)
    }

    /// Close the session.
    ///
    /// Calls made while a logout is in flight are ignored. On failure the
    /// cached account data is kept.
    pub async fn logout(&self) {
        let in_flight = self.commit(|state| std::mem::replace(&mut state.logging_out, true));
        if in_flight {
            debug!("logout already in progress");
            return;
        }

        // Tracked first: the session token is gone once the call succeeds.
        self.ports.metrics.track(MetricEvent::LoggedOut);

        match self.ports.user.logout().await {
            Ok(()) => {
                self.complete_logout().await;
                self.error_store.dispatch(RequestEvent::CompletedLogout);
                self.ports.effects.fade_out_logout_overlay().await;
                self.commit(|state| state.logging_out = false);
                info!("logged out");
            }
            Err(error) => {
                self.commit(|state| state.logging_out = false);
                let event = RequestEvent::FailedLogout {
                    error: error.clone(),
                };
                self.report_failure(&error, event, "An error occurred while logging out")
                    .await;
            }
        }
    }

    /// Answer the forced re-login prompt shown after a 401.
    ///
    /// The server already dropped the session, so only the local session is
    /// destroyed.
    pub async fn log_back_in(&self) {
        self.commit(|state| state.notification = None);
        self.ports.user.destroy_session();
        self.complete_logout().await;
    }

    async fn complete_logout(&self) {
        self.commit(|state| {
            state.page = Some(Page::Login);
            state.authenticated = false;
            state.clear_user_data();
        });
        self.navigate(&Route::Login.path()).await;
    }

    /// Create the patient profile managed by the signed-in account and open
    /// its data page.
    pub async fn create_patient(&self, draft: &NewPatient) -> ApiResult<Patient> {
        let patient = match self.ports.patient.post(draft).await {
            Ok(patient) => patient,
            Err(error) => {
                self.error_store.dispatch(RequestEvent::FailedCreatePatient {
                    error: error.clone(),
                });
                return Err(error);
            }
        };

        let created = patient.clone();
        self.commit(|state| {
            if let RequestState::Loaded(user) = &state.user {
                state.user = RequestState::Loaded(user.with_patient(created.id.clone()));
            }
            state.patient = RequestState::Loaded(created);
        });
        self.navigate(&Route::PatientData(patient.id.clone()).path())
            .await;
        Ok(patient)
    }

    /// Hide the terms overlay.
    pub fn accept_terms(&self) {
        self.commit(|state| state.showing_accept_terms = false);
    }

    /// Clear the notification if the user may dismiss it. Returns whether it
    /// was cleared.
    pub fn close_notification(&self) -> bool {
        self.commit(|state| match &state.notification {
            Some(notification) if !notification.is_dismissable => false,
            _ => {
                state.notification = None;
                true
            }
        })
    }

    /// Dismiss the global request error banner.
    pub fn dismiss_request_error(&self) {
        self.error_store.dispatch(RequestEvent::DismissedRequestError);
    }

    /// Reply to a note thread.
    pub async fn reply_to_message_thread(&self, message: &NewMessage) -> ApiResult<Message> {
        self.ports.team.reply_to_message_thread(message).await
    }

    /// Start a note thread.
    pub async fn start_message_thread(&self, message: &NewMessage) -> ApiResult<Message> {
        self.ports.team.start_message_thread(message).await
    }
}
