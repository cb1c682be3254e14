//! Application controller: route dispatch, UI state, fetches and updates.
//!
//! The controller drives ports only. All state lives in one [`AppState`]
//! behind a mutex that is never held across an `.await`; every mutation goes
//! through [`AppController::commit`], which logs the changed fields and
//! notifies subscribers once the lock is released.

mod errors;
mod fetch;
mod routes;
mod session;
mod state;
mod updates;
mod view;

#[cfg(test)]
mod tests;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{
    DataProcessor, ErrorLog, Metrics, PatientApi, PatientDataApi, TeamApi, UserApi, ViewEffects,
};
use crate::domain::{ErrorStore, Route, RoutePolicy, SubscriptionId, Subscribers};

pub use self::state::AppState;
pub use self::view::{Navbar, Overlay, PageView, View};

/// Driven ports used by the controller.
#[derive(Clone)]
pub struct AppPorts {
    /// Account and session calls.
    pub user: Arc<dyn UserApi>,
    /// Patient profile calls.
    pub patient: Arc<dyn PatientApi>,
    /// Device data uploads.
    pub patient_data: Arc<dyn PatientDataApi>,
    /// Team notes and message threads.
    pub team: Arc<dyn TeamApi>,
    /// Remote error log.
    pub errors: Arc<dyn ErrorLog>,
    /// Usage telemetry.
    pub metrics: Arc<dyn Metrics>,
    /// Time-series preprocessing.
    pub processor: Arc<dyn DataProcessor>,
    /// Timed view transitions.
    pub effects: Arc<dyn ViewEffects>,
    /// Source of "today" for form validation.
    pub clock: Arc<dyn Clock>,
}

/// Deployment switches that shape controller behaviour.
#[derive(Debug, Clone, Default)]
pub struct ControllerOptions {
    /// Show the terms overlay after signup.
    pub show_accept_terms: bool,
    /// Build version displayed in the navbar.
    pub version: Option<String>,
    /// Auth gating for the route table.
    pub policy: RoutePolicy,
}

/// Orchestrates routes, state and port calls for one client session.
pub struct AppController {
    ports: AppPorts,
    error_store: Arc<ErrorStore>,
    options: ControllerOptions,
    state: Mutex<AppState>,
    subscribers: Subscribers,
}

impl AppController {
    /// Build a controller; the initial auth flag comes from the user port.
    pub fn new(ports: AppPorts, error_store: Arc<ErrorStore>, options: ControllerOptions) -> Self {
        let authenticated = ports.user.is_authenticated();
        Self {
            ports,
            error_store,
            options,
            state: Mutex::new(AppState::new(authenticated)),
            subscribers: Subscribers::default(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AppState {
        self.lock().clone()
    }

    fn read<R>(&self, inspect: impl FnOnce(&AppState) -> R) -> R {
        inspect(&self.lock())
    }

    /// The shared error store.
    pub fn error_store(&self) -> &Arc<ErrorStore> {
        &self.error_store
    }

    /// Route gating in effect.
    pub fn policy(&self) -> &RoutePolicy {
        &self.options.policy
    }

    /// Whether the session is open.
    pub fn is_authenticated(&self) -> bool {
        self.read(|state| state.authenticated)
    }

    /// Register a listener called after every state change.
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    /// Remove a state listener. Returns whether it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Apply a mutation atomically, then notify listeners if anything
    /// changed.
    pub(crate) fn commit<R>(&self, change: impl FnOnce(&mut AppState) -> R) -> R {
        let (output, changed) = {
            let mut state = self.lock();
            let previous = state.clone();
            let output = change(&mut state);
            (output, state.changed_fields(&previous))
        };
        if !changed.is_empty() {
            debug!(fields = ?changed, "state changed");
            self.subscribers.notify();
        }
        output
    }

    /// Boot the session: load the account when a session is already open,
    /// then route to `path`.
    pub async fn start(&self, path: &str) -> Route {
        if self.is_authenticated() {
            self.fetch_user().await;
        }
        self.navigate(path).await
    }
}

impl std::fmt::Debug for AppController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppController")
            .field("state", &*self.lock())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
