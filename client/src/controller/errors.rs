//! Shared failure handling for every port call.

use tracing::{error, info, warn};

use crate::domain::{ApiError, Notification, RequestEvent};

use super::AppController;

impl AppController {
    /// React to an API failure the user needs to know about.
    ///
    /// Logs locally, shows a notification and ships the serialised error to
    /// the remote log. A 401 replaces the generic banner with a
    /// non-dismissable prompt to log back in.
    pub async fn handle_api_error(&self, api_error: &ApiError, context: &str) {
        error!(
            code = ?api_error.code(),
            status = ?api_error.status(),
            error = %api_error,
            "{context}"
        );

        let stringified = api_error.stringify();
        let notification = if api_error.is_unauthorized() {
            Notification::session_expired()
        } else {
            Notification::generic_error(Some(format!("{context} {stringified}")))
        };
        self.commit(|state| state.notification = Some(notification));

        if let Err(err) = self.ports.errors.log(stringified, context).await {
            warn!(error = %err, "failed to ship error report");
        }
    }

    /// Record a failure in the error store and hand it to the shared handler.
    pub(super) async fn report_failure(
        &self,
        api_error: &ApiError,
        event: RequestEvent,
        context: &str,
    ) {
        self.error_store.dispatch(event);
        self.handle_api_error(api_error, context).await;
    }

    /// Like [`Self::report_failure`], except that a 404 is only logged.
    pub(super) async fn report_lookup_failure(
        &self,
        api_error: &ApiError,
        event: RequestEvent,
        context: &str,
    ) {
        if api_error.is_not_found() {
            info!(status = 404, "{context}");
            return;
        }
        self.report_failure(api_error, event, context).await;
    }
}
