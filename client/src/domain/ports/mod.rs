//! Ports the controller drives.
//!
//! Every API call goes through one of these traits so the controller can be
//! exercised against mocks, the in-memory fixture API or the HTTP adapter
//! without code changes. Fallible calls return [`ApiResult`](super::ApiResult).

mod macros;
pub(crate) use macros::define_port_error;

mod data_processor;
mod error_log;
mod metrics;
mod patient_api;
mod patient_data_api;
mod team_api;
mod transport;
mod user_api;
mod view_effects;

pub use data_processor::DataProcessor;
#[cfg(test)]
pub use data_processor::MockDataProcessor;
pub use error_log::{ErrorLog, ErrorLogError};
pub use metrics::{Metrics, NoOpMetrics};
#[cfg(test)]
pub use patient_api::MockPatientApi;
pub use patient_api::PatientApi;
#[cfg(test)]
pub use patient_data_api::MockPatientDataApi;
pub use patient_data_api::PatientDataApi;
#[cfg(test)]
pub use team_api::MockTeamApi;
pub use team_api::TeamApi;
pub use transport::TransportError;
#[cfg(test)]
pub use user_api::MockUserApi;
pub use user_api::UserApi;
#[cfg(test)]
pub use view_effects::MockViewEffects;
pub use view_effects::{ImmediateViewEffects, ViewEffects};
