//! Port for patient profile calls.

use async_trait::async_trait;

use crate::domain::{ApiResult, NewPatient, Patient, PatientId};

/// Patient profile operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientApi: Send + Sync {
    /// Fetch one profile.
    async fn get(&self, patient_id: &PatientId) -> ApiResult<Patient>;

    /// Fetch every profile the signed-in user can see.
    async fn get_all(&self) -> ApiResult<Vec<Patient>>;

    /// Create a profile managed by the signed-in user.
    async fn post(&self, patient: &NewPatient) -> ApiResult<Patient>;

    /// Replace the attributes of an existing profile.
    async fn put(&self, patient_id: &PatientId, attributes: &NewPatient) -> ApiResult<Patient>;
}
