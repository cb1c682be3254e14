//! Port for device data uploads of a patient.

use async_trait::async_trait;

use crate::domain::{ApiResult, DataRecord, PatientId};

/// Device data uploads of a patient.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientDataApi: Send + Sync {
    /// Fetch every device record of the patient.
    async fn get(&self, patient_id: &PatientId) -> ApiResult<Vec<DataRecord>>;
}
