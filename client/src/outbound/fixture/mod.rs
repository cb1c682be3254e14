//! In-memory API used for demos and integration tests.
//!
//! [`FixtureApi`] serves a [`FixtureSeed`] from memory and implements every
//! API port. Behaviour is steered by [`MockParams`]: the session can start
//! open, every call can be delayed, and individual operations can be forced
//! to fail with a given status. Operation names follow
//! `<port>.<method>`, for example `patient.getall` or `team.getnotes`.

mod params;
mod seed;

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;
use zeroize::Zeroizing;

pub use self::params::MockParams;
pub use self::seed::FixtureSeed;
use crate::domain::ports::{
    ErrorLog, ErrorLogError, PatientApi, PatientDataApi, TeamApi, UserApi,
};
use crate::domain::{
    ApiError, ApiResult, DataRecord, LoginCredentials, Message, MessageThread, NewMessage,
    NewPatient, Patient, PatientId, SignupDetails, User, UserUpdate,
};

/// Failure report captured by the fixture error log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    /// Serialised error.
    pub error: String,
    /// What the client was doing.
    pub context: String,
}

struct FixtureState {
    authenticated: bool,
    password: Zeroizing<String>,
    user: User,
    patients: Vec<Patient>,
    device_data: BTreeMap<PatientId, Vec<DataRecord>>,
    messages: Vec<Message>,
    error_reports: Vec<ErrorReport>,
}

impl FixtureState {
    fn patient(&self, patient_id: &PatientId) -> ApiResult<&Patient> {
        self.patients
            .iter()
            .find(|patient| &patient.id == patient_id)
            .ok_or_else(|| ApiError::not_found(format!("Patient {patient_id} not found")))
    }

    fn author(&self) -> String {
        self.user
            .userid
            .clone()
            .unwrap_or_else(|| self.user.username.clone())
    }
}

/// API ports backed by in-memory demo data.
pub struct FixtureApi {
    params: MockParams,
    state: Mutex<FixtureState>,
}

impl FixtureApi {
    /// Serve `seed`, honouring `params`.
    pub fn new(params: MockParams, seed: FixtureSeed) -> Self {
        let authenticated = params.skip_auth();
        Self {
            params,
            state: Mutex::new(FixtureState {
                authenticated,
                password: Zeroizing::new(seed.password),
                user: seed.user,
                patients: seed.patients,
                device_data: seed.device_data,
                messages: seed.messages,
                error_reports: Vec::new(),
            }),
        }
    }

    /// Serve the bundled demo data set.
    ///
    /// # Errors
    ///
    /// Returns an error when the bundled seed does not decode.
    pub fn demo(params: MockParams) -> Result<Self, serde_json::Error> {
        Ok(Self::new(params, FixtureSeed::demo()?))
    }

    /// Parameters in effect.
    pub fn params(&self) -> &MockParams {
        &self.params
    }

    /// Failure reports received so far, oldest first.
    pub fn error_reports(&self) -> Vec<ErrorReport> {
        self.lock().error_reports.clone()
    }

    fn lock(&self) -> MutexGuard<'_, FixtureState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply the configured delay and forced failure for `operation`.
    async fn simulate(&self, operation: &'static str) -> ApiResult<()> {
        if let Some(delay) = self.params.delay() {
            tokio::time::sleep(delay).await;
        }
        if let Some(status) = self.params.failure_for(operation) {
            debug!(operation, status, "simulated API failure");
            return Err(ApiError::from_status(
                status,
                format!("Simulated failure of {operation}"),
            ));
        }
        Ok(())
    }

    /// As [`Self::simulate`], then reject calls without a session.
    async fn simulate_signed_in(&self, operation: &'static str) -> ApiResult<()> {
        self.simulate(operation).await?;
        if self.lock().authenticated {
            Ok(())
        } else {
            Err(ApiError::unauthorized("No active session"))
        }
    }
}

impl std::fmt::Debug for FixtureApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixtureApi")
            .field("params", &self.params)
            .field("authenticated", &self.lock().authenticated)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl UserApi for FixtureApi {
    async fn get(&self) -> ApiResult<User> {
        self.simulate_signed_in("user.get").await?;
        Ok(self.lock().user.clone())
    }

    async fn put(&self, update: &UserUpdate) -> ApiResult<User> {
        self.simulate_signed_in("user.put").await?;
        let mut state = self.lock();
        if let Some(username) = &update.username {
            state.user.username.clone_from(username);
        }
        state.user.full_name.clone_from(&update.full_name);
        if let Some(password) = &update.password {
            state.password = password.clone();
        }
        Ok(state.user.clone())
    }

    async fn login(&self, credentials: &LoginCredentials) -> ApiResult<()> {
        self.simulate("user.login").await?;
        let mut state = self.lock();
        if credentials.username() != state.user.username
            || credentials.password() != state.password.as_str()
        {
            return Err(ApiError::unauthorized("Wrong username or password"));
        }
        state.authenticated = true;
        info!(remember = credentials.remember(), "fixture session opened");
        Ok(())
    }

    async fn logout(&self) -> ApiResult<()> {
        self.simulate_signed_in("user.logout").await?;
        self.lock().authenticated = false;
        Ok(())
    }

    async fn signup(&self, details: &SignupDetails) -> ApiResult<User> {
        self.simulate("user.signup").await?;
        let mut state = self.lock();
        if details.username() == state.user.username {
            return Err(ApiError::invalid_request("That username is already taken"));
        }
        state.user = User {
            userid: Some(Uuid::new_v4().to_string()),
            username: details.username().to_owned(),
            full_name: details.full_name().to_owned(),
            patient: None,
        };
        state.password = Zeroizing::new(details.password().to_owned());
        state.authenticated = true;
        Ok(state.user.clone())
    }

    fn is_authenticated(&self) -> bool {
        self.lock().authenticated
    }

    fn destroy_session(&self) {
        self.lock().authenticated = false;
    }
}

#[async_trait]
impl PatientApi for FixtureApi {
    async fn get(&self, patient_id: &PatientId) -> ApiResult<Patient> {
        self.simulate_signed_in("patient.get").await?;
        self.lock().patient(patient_id).cloned()
    }

    async fn get_all(&self) -> ApiResult<Vec<Patient>> {
        self.simulate_signed_in("patient.getall").await?;
        Ok(self.lock().patients.clone())
    }

    async fn post(&self, patient: &NewPatient) -> ApiResult<Patient> {
        self.simulate_signed_in("patient.post").await?;
        let mut state = self.lock();
        if state.user.patient.is_some() {
            return Err(ApiError::conflict("User already has a patient profile"));
        }
        let id = PatientId::new(Uuid::new_v4().simple().to_string())
            .map_err(|err| ApiError::internal(err.to_string()))?;
        let created = patient.clone().into_patient(id.clone());
        state.patients.push(created.clone());
        state.user = state.user.with_patient(id);
        Ok(created)
    }

    async fn put(&self, patient_id: &PatientId, attributes: &NewPatient) -> ApiResult<Patient> {
        self.simulate_signed_in("patient.put").await?;
        let mut state = self.lock();
        let stored = state
            .patients
            .iter_mut()
            .find(|patient| &patient.id == patient_id)
            .ok_or_else(|| ApiError::not_found(format!("Patient {patient_id} not found")))?;
        *stored = attributes.clone().into_patient(patient_id.clone());
        Ok(stored.clone())
    }
}

#[async_trait]
impl PatientDataApi for FixtureApi {
    async fn get(&self, patient_id: &PatientId) -> ApiResult<Vec<DataRecord>> {
        self.simulate_signed_in("patientdata.get").await?;
        let state = self.lock();
        state.patient(patient_id)?;
        Ok(state
            .device_data
            .get(patient_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl TeamApi for FixtureApi {
    async fn get_notes(&self, patient_id: &PatientId) -> ApiResult<Vec<DataRecord>> {
        self.simulate_signed_in("team.getnotes").await?;
        let state = self.lock();
        state.patient(patient_id)?;
        Ok(state
            .messages
            .iter()
            .filter(|message| &message.group_id == patient_id && message.parent_message.is_none())
            .cloned()
            .map(Message::into_note_record)
            .collect())
    }

    async fn get_message_thread(&self, thread_id: &str) -> ApiResult<MessageThread> {
        self.simulate_signed_in("team.getmessagethread").await?;
        let state = self.lock();
        let mut thread: MessageThread = state
            .messages
            .iter()
            .filter(|message| {
                message.id == thread_id || message.parent_message.as_deref() == Some(thread_id)
            })
            .cloned()
            .collect();
        if thread.is_empty() {
            return Err(ApiError::not_found(format!(
                "Message thread {thread_id} not found"
            )));
        }
        thread.sort_by_key(|message| message.timestamp);
        Ok(thread)
    }

    async fn reply_to_message_thread(&self, message: &NewMessage) -> ApiResult<Message> {
        self.simulate_signed_in("team.replytomessagethread").await?;
        let mut state = self.lock();
        let Some(parent) = message.parent_message.as_deref() else {
            return Err(ApiError::invalid_request("a reply needs a parent message"));
        };
        if !state.messages.iter().any(|stored| stored.id == parent) {
            return Err(ApiError::not_found(format!(
                "Message thread {parent} not found"
            )));
        }
        let stored = message
            .clone()
            .into_message(Uuid::new_v4().to_string(), state.author());
        state.messages.push(stored.clone());
        Ok(stored)
    }

    async fn start_message_thread(&self, message: &NewMessage) -> ApiResult<Message> {
        self.simulate_signed_in("team.startmessagethread").await?;
        let mut state = self.lock();
        state.patient(&message.group_id)?;
        let stored = NewMessage {
            parent_message: None,
            ..message.clone()
        }
        .into_message(Uuid::new_v4().to_string(), state.author());
        state.messages.push(stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl ErrorLog for FixtureApi {
    async fn log(&self, error: String, context: &str) -> Result<(), ErrorLogError> {
        info!(%error, context, "fixture error report");
        self.lock().error_reports.push(ErrorReport {
            error,
            context: context.to_owned(),
        });
        Ok(())
    }
}
