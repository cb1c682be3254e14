//! Fetch protocol: mark loading, call the port, settle, route failures.

use futures_util::future::join;
use tracing::{debug, info};

use crate::domain::{
    MessageThread, Patient, PatientId, RequestEvent, RequestState, User, merge_records,
};

use super::AppController;

impl AppController {
    /// Load the signed-in account.
    pub async fn fetch_user(&self) -> Option<User> {
        self.commit(|state| state.user = RequestState::Loading);
        match self.ports.user.get().await {
            Ok(user) => {
                self.commit(|state| state.user = RequestState::Loaded(user.clone()));
                Some(user)
            }
            Err(error) => {
                self.commit(|state| state.user = RequestState::Failed(error.clone()));
                let event = RequestEvent::FailedGetUser {
                    error: error.clone(),
                };
                self.report_failure(&error, event, "An error occurred while fetching user")
                    .await;
                None
            }
        }
    }

    /// Load every patient the account can see.
    pub async fn fetch_patients(&self) {
        self.commit(|state| state.patients = RequestState::Loading);
        match self.ports.patient.get_all().await {
            Ok(patients) => {
                debug!(count = patients.len(), "fetched patients");
                self.commit(|state| state.patients = RequestState::Loaded(patients));
            }
            Err(error) => {
                self.commit(|state| state.patients = RequestState::Failed(error.clone()));
                let event = RequestEvent::FailedGetPatients {
                    error: error.clone(),
                };
                self.report_failure(
                    &error,
                    event,
                    "Something went wrong while fetching care teams",
                )
                .await;
            }
        }
    }

    /// Load one patient profile.
    pub async fn fetch_patient(&self, patient_id: &PatientId) -> Option<Patient> {
        self.commit(|state| state.patient = RequestState::Loading);
        match self.ports.patient.get(patient_id).await {
            Ok(patient) => {
                self.commit(|state| state.patient = RequestState::Loaded(patient.clone()));
                Some(patient)
            }
            Err(error) => {
                self.commit(|state| state.patient = RequestState::Failed(error.clone()));
                let event = RequestEvent::FailedGetPatient {
                    patient_id: patient_id.clone(),
                    error: error.clone(),
                };
                let context = format!("Error fetching patient with id {patient_id}");
                self.report_lookup_failure(&error, event, &context).await;
                None
            }
        }
    }

    /// Load device data and team notes together, merge and process them.
    ///
    /// Both requests must succeed; on any failure no data is stored.
    pub async fn fetch_patient_data(&self, patient_id: &PatientId) {
        self.commit(|state| state.patient_data = RequestState::Loading);

        let (device_data, notes) = join(
            self.ports.patient_data.get(patient_id),
            self.ports.team.get_notes(patient_id),
        )
        .await;

        let records = match (device_data, notes) {
            (Ok(device_data), Ok(notes)) => {
                info!(
                    patient_id = %patient_id,
                    device_records = device_data.len(),
                    team_notes = notes.len(),
                    "fetched patient data"
                );
                merge_records(device_data, notes)
            }
            (Err(error), _) | (_, Err(error)) => {
                self.commit(|state| state.patient_data = RequestState::Failed(error.clone()));
                let event = RequestEvent::FailedGetPatientData {
                    patient_id: patient_id.clone(),
                    error: error.clone(),
                };
                let context = format!("Error fetching data for patient with id {patient_id}");
                self.report_lookup_failure(&error, event, &context).await;
                return;
            }
        };

        let processed = self.ports.processor.process(records);
        self.commit(|state| state.patient_data = RequestState::Loaded(processed));
    }

    /// Refetch data for the patient on screen. No-op without one.
    pub async fn refresh_patient_data(&self) {
        let Some(patient_id) = self.read(|state| state.patient().map(|patient| patient.id.clone()))
        else {
            debug!("no patient loaded; skipping data refresh");
            return;
        };
        self.fetch_patient_data(&patient_id).await;
    }

    /// Load a note thread on demand. Failures are reported and yield `None`.
    pub async fn fetch_message_thread(&self, thread_id: &str) -> Option<MessageThread> {
        debug!(thread_id, "fetching message thread");
        match self.ports.team.get_message_thread(thread_id).await {
            Ok(thread) => {
                debug!(thread_id, messages = thread.len(), "fetched message thread");
                Some(thread)
            }
            Err(error) => {
                let event = RequestEvent::FailedGetMessageThread {
                    thread_id: thread_id.to_owned(),
                    error: error.clone(),
                };
                let context = format!("Error fetching data for message thread with id {thread_id}");
                self.report_failure(&error, event, &context).await;
                None
            }
        }
    }
}
