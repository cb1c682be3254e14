//! Request outcome events consumed by the [`ErrorStore`](super::ErrorStore).
//!
//! Each failure event carries the original [`ApiError`] plus whatever
//! identifier scopes it, so the store can build a uniform [`ErrorRecord`]
//! without knowing which screen triggered the request.

use serde::Serialize;

use crate::domain::{ApiError, PatientId};

/// Stable identifier of the failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKey {
    /// Credentials were rejected or the login call failed.
    FailedLogin,
    /// Account creation failed.
    FailedSignup,
    /// The logout call failed.
    FailedLogout,
    /// The signed-in account could not be loaded.
    FailedGetUser,
    /// Saving account changes failed.
    FailedUpdateUser,
    /// The patient list could not be loaded.
    FailedGetPatients,
    /// A single patient profile could not be loaded.
    FailedGetPatient,
    /// Creating a patient profile failed.
    FailedCreatePatient,
    /// Saving profile changes failed.
    FailedUpdatePatient,
    /// Device data or team notes could not be loaded.
    FailedGetPatientData,
    /// A note thread could not be loaded.
    FailedGetMessageThread,
}

impl ErrorKey {
    /// Machine-readable key.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FailedLogin => "failed_login",
            Self::FailedSignup => "failed_signup",
            Self::FailedLogout => "failed_logout",
            Self::FailedGetUser => "failed_get_user",
            Self::FailedUpdateUser => "failed_update_user",
            Self::FailedGetPatients => "failed_get_patients",
            Self::FailedGetPatient => "failed_get_patient",
            Self::FailedCreatePatient => "failed_create_patient",
            Self::FailedUpdatePatient => "failed_update_patient",
            Self::FailedGetPatientData => "failed_get_patient_data",
            Self::FailedGetMessageThread => "failed_get_message_thread",
        }
    }
}

/// Identifier that scopes a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ErrorContext {
    /// The patient the request targeted.
    Patient(PatientId),
    /// The message thread the request targeted.
    MessageThread(String),
}

/// Classified failure stored for global UI reaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorRecord {
    /// Which operation failed.
    pub key: ErrorKey,
    /// User-facing description.
    pub message: String,
    /// Error returned by the port.
    pub original: ApiError,
    /// Scoping identifier, when the operation targeted one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,
}

/// Events dispatched to the error store.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestEvent {
    /// The user closed the global error banner.
    DismissedRequestError,
    /// Logout finished; all request errors are stale.
    CompletedLogout,
    /// Login was rejected.
    FailedLogin {
        /// Error returned by the port.
        error: ApiError,
    },
    /// Signup was rejected.
    FailedSignup {
        /// Error returned by the port.
        error: ApiError,
    },
    /// The logout call failed.
    FailedLogout {
        /// Error returned by the port.
        error: ApiError,
    },
    /// Fetching the account failed.
    FailedGetUser {
        /// Error returned by the port.
        error: ApiError,
    },
    /// Saving the account failed.
    FailedUpdateUser {
        /// Error returned by the port.
        error: ApiError,
    },
    /// Fetching the patient list failed.
    FailedGetPatients {
        /// Error returned by the port.
        error: ApiError,
    },
    /// Fetching a patient failed.
    FailedGetPatient {
        /// Patient the request targeted.
        patient_id: PatientId,
        /// Error returned by the port.
        error: ApiError,
    },
    /// Creating a patient failed.
    FailedCreatePatient {
        /// Error returned by the port.
        error: ApiError,
    },
    /// Saving a patient failed.
    FailedUpdatePatient {
        /// Patient the request targeted.
        patient_id: PatientId,
        /// Error returned by the port.
        error: ApiError,
    },
    /// Fetching patient data failed.
    FailedGetPatientData {
        /// Patient the request targeted.
        patient_id: PatientId,
        /// Error returned by the port.
        error: ApiError,
    },
    /// Fetching a note thread failed.
    FailedGetMessageThread {
        /// Thread the request targeted.
        thread_id: String,
        /// Error returned by the port.
        error: ApiError,
    },
}

impl RequestEvent {
    /// Classified record for a failure event; `None` for control events.
    ///
    /// This does not apply suppression rules; see
    /// [`RequestEvent::is_expected_failure`].
    pub fn to_record(&self) -> Option<ErrorRecord> {
        let (key, message, error, context) = match self {
            Self::DismissedRequestError | Self::CompletedLogout => return None,
            Self::FailedLogin { error } => (
                ErrorKey::FailedLogin,
                "Something went wrong while logging in".to_owned(),
                error,
                None,
            ),
            Self::FailedSignup { error } => (
                ErrorKey::FailedSignup,
                "Something went wrong while signing up".to_owned(),
                error,
                None,
            ),
            Self::FailedLogout { error } => (
                ErrorKey::FailedLogout,
                "Something went wrong while logging out".to_owned(),
                error,
                None,
            ),
            Self::FailedGetUser { error } => (
                ErrorKey::FailedGetUser,
                "Something went wrong while fetching the user account".to_owned(),
                error,
                None,
            ),
            Self::FailedUpdateUser { error } => (
                ErrorKey::FailedUpdateUser,
                "Something went wrong while updating the user account".to_owned(),
                error,
                None,
            ),
            Self::FailedGetPatients { error } => (
                ErrorKey::FailedGetPatients,
                "Something went wrong while trying to fetch patients user has access to"
                    .to_owned(),
                error,
                None,
            ),
            Self::FailedGetPatient { patient_id, error } => (
                ErrorKey::FailedGetPatient,
                format!("Something went wrong while trying to fetch patient {patient_id}"),
                error,
                Some(ErrorContext::Patient(patient_id.clone())),
            ),
            Self::FailedCreatePatient { error } => (
                ErrorKey::FailedCreatePatient,
                "Something went wrong while trying to create patient".to_owned(),
                error,
                None,
            ),
            Self::FailedUpdatePatient { patient_id, error } => (
                ErrorKey::FailedUpdatePatient,
                format!("Something went wrong while trying to update patient {patient_id}"),
                error,
                Some(ErrorContext::Patient(patient_id.clone())),
            ),
            Self::FailedGetPatientData { patient_id, error } => (
                ErrorKey::FailedGetPatientData,
                format!(
                    "Something went wrong while trying to fetch data for patient {patient_id}"
                ),
                error,
                Some(ErrorContext::Patient(patient_id.clone())),
            ),
            Self::FailedGetMessageThread { thread_id, error } => (
                ErrorKey::FailedGetMessageThread,
                format!("Something went wrong while trying to fetch message thread {thread_id}"),
                error,
                Some(ErrorContext::MessageThread(thread_id.clone())),
            ),
        };
        Some(ErrorRecord {
            key,
            message,
            original: error.clone(),
            context,
        })
    }

    /// Failures the initiating form reports inline instead of globally:
    /// wrong credentials on login and a taken username on signup.
    pub fn is_expected_failure(&self) -> bool {
        match self {
            Self::FailedLogin { error } => error.status() == Some(401),
            Self::FailedSignup { error } => error.status() == Some(400),
            _ => false,
        }
    }
}
