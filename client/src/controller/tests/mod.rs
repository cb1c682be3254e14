//! Controller behaviour against mocked ports.

mod updates;
mod view;

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use super::{AppController, AppPorts, ControllerOptions};
use crate::domain::ports::{
    DataProcessor, ErrorLog, ErrorLogError, ImmediateViewEffects, Metrics, MockPatientApi,
    MockPatientDataApi, MockTeamApi, MockUserApi, ViewEffects,
};
use crate::domain::{
    DataRecord, ErrorStore, MetricEvent, Patient, PatientId, PatientRef, ProcessedData, User,
};

pub(super) struct RecordingMetrics(Mutex<Vec<MetricEvent>>);

impl RecordingMetrics {
    pub(super) fn events(&self) -> Vec<MetricEvent> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Metrics for RecordingMetrics {
    fn track(&self, event: MetricEvent) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

pub(super) struct RecordingErrorLog(Mutex<Vec<(String, String)>>);

impl RecordingErrorLog {
    pub(super) fn entries(&self) -> Vec<(String, String)> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl ErrorLog for RecordingErrorLog {
    async fn log(&self, error: String, context: &str) -> Result<(), ErrorLogError> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((error, context.to_owned()));
        Ok(())
    }
}

/// Keeps merged records as they are.
struct PassThroughProcessor;

impl DataProcessor for PassThroughProcessor {
    fn process(&self, records: Vec<DataRecord>) -> ProcessedData {
        ProcessedData {
            records,
            ..ProcessedData::default()
        }
    }
}

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Mocked ports awaiting expectations.
pub(super) struct Harness {
    pub user: MockUserApi,
    pub patient: MockPatientApi,
    pub patient_data: MockPatientDataApi,
    pub team: MockTeamApi,
    pub processor: Arc<dyn DataProcessor>,
    pub effects: Arc<dyn ViewEffects>,
    pub options: ControllerOptions,
}

/// Controller wired to the harness plus the recording fakes.
pub(super) struct TestApp {
    pub controller: Arc<AppController>,
    pub metrics: Arc<RecordingMetrics>,
    pub error_log: Arc<RecordingErrorLog>,
    pub store: Arc<ErrorStore>,
}

impl Harness {
    pub(super) fn new(authenticated: bool) -> Self {
        let mut user = MockUserApi::new();
        user.expect_is_authenticated().return_const(authenticated);
        Self {
            user,
            patient: MockPatientApi::new(),
            patient_data: MockPatientDataApi::new(),
            team: MockTeamApi::new(),
            processor: Arc::new(PassThroughProcessor),
            effects: Arc::new(ImmediateViewEffects),
            options: ControllerOptions::default(),
        }
    }

    pub(super) fn build(self) -> TestApp {
        let metrics = Arc::new(RecordingMetrics(Mutex::new(Vec::new())));
        let error_log = Arc::new(RecordingErrorLog(Mutex::new(Vec::new())));
        let store = Arc::new(ErrorStore::new());
        let today = Utc
            .with_ymd_and_hms(2026, 10, 16, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp");
        let ports = AppPorts {
            user: Arc::new(self.user),
            patient: Arc::new(self.patient),
            patient_data: Arc::new(self.patient_data),
            team: Arc::new(self.team),
            errors: error_log.clone(),
            metrics: metrics.clone(),
            processor: self.processor,
            effects: self.effects,
            clock: Arc::new(FixedClock(today)),
        };
        TestApp {
            controller: Arc::new(AppController::new(ports, Arc::clone(&store), self.options)),
            metrics,
            error_log,
            store,
        }
    }
}

pub(super) fn patient_id() -> PatientId {
    PatientId::new("abc123").expect("valid id")
}

pub(super) fn patient() -> Patient {
    Patient::fixture(patient_id())
}

/// Account without a patient profile.
pub(super) fn member() -> User {
    User {
        userid: Some("u-1".to_owned()),
        username: "demo@example.org".to_owned(),
        full_name: "Demo Member".to_owned(),
        patient: None,
    }
}

/// Account managing patient `abc123`.
pub(super) fn owner() -> User {
    User {
        patient: Some(PatientRef { id: patient_id() }),
        ..member()
    }
}
