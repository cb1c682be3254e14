//! Optimistic updates with rollback, plus form validation.

use tracing::warn;

use crate::domain::{
    ApiError, ApiResult, MetricEvent, NewPatient, Patient, PatientPatch, RequestEvent,
    RequestState, User, UserPatch, UserUpdate, ValidationErrors, validate_patient, validate_user,
};

use super::AppController;

impl AppController {
    /// Apply an account edit immediately, then reconcile with the server.
    ///
    /// The display copy never carries the password. Only account attributes
    /// are sent and the username is omitted when unchanged. On failure the
    /// previous account is restored.
    pub async fn update_user(&self, patch: &UserPatch) -> ApiResult<User> {
        let Some(previous) = self.read(|state| state.user().cloned()) else {
            warn!("account update requested before the account loaded");
            return Err(ApiError::invalid_request("user account is not loaded"));
        };

        let merged = previous.apply(patch);
        let update = UserUpdate::from_merged(&previous, &merged, patch);
        self.commit(|state| state.user = RequestState::Loaded(merged));

        match self.ports.user.put(&update).await {
            Ok(saved) => {
                self.commit(|state| state.user = RequestState::Loaded(saved.clone()));
                self.ports.metrics.track(MetricEvent::UpdatedAccount);
                Ok(saved)
            }
            Err(error) => {
                self.commit(|state| state.user = RequestState::Loaded(previous));
                let event = RequestEvent::FailedUpdateUser {
                    error: error.clone(),
                };
                self.report_failure(&error, event, "An error occurred while updating user account")
                    .await;
                Err(error)
            }
        }
    }

    /// Apply a profile edit immediately, then reconcile with the server.
    pub async fn update_patient(&self, patch: &PatientPatch) -> ApiResult<Patient> {
        let Some(previous) = self.read(|state| state.patient().cloned()) else {
            warn!("profile update requested before the profile loaded");
            return Err(ApiError::invalid_request("patient profile is not loaded"));
        };

        let merged = previous.apply(patch);
        let attributes = merged.attributes();
        self.commit(|state| state.patient = RequestState::Loaded(merged));

        match self.ports.patient.put(&previous.id, &attributes).await {
            Ok(saved) => {
                self.commit(|state| state.patient = RequestState::Loaded(saved.clone()));
                self.ports.metrics.track(MetricEvent::UpdatedProfile);
                Ok(saved)
            }
            Err(error) => {
                let patient_id = previous.id.clone();
                self.commit(|state| state.patient = RequestState::Loaded(previous));
                let event = RequestEvent::FailedUpdatePatient {
                    patient_id,
                    error: error.clone(),
                };
                self.report_failure(&error, event, "An error occurred while saving patient")
                    .await;
                Err(error)
            }
        }
    }

    /// Check an account form. The patch is applied to the loaded account,
    /// or to an empty one on the signup form.
    pub fn validate_user(&self, patch: &UserPatch) -> Result<(), ValidationErrors> {
        let base = self.read(|state| state.user().cloned()).unwrap_or_else(|| User {
            userid: None,
            username: String::new(),
            full_name: String::new(),
            patient: None,
        });
        validate_user(&base.apply(patch), patch)
    }

    /// Check a patient profile form against today's date.
    pub fn validate_patient(&self, draft: &NewPatient) -> Result<(), ValidationErrors> {
        let today = self.ports.clock.utc().date_naive();
        validate_patient(
            &draft.full_name,
            draft.birthday,
            draft.diagnosis_date,
            today,
        )
    }
}
