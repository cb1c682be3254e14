//! Domain primitives, request events and the ports the controller drives.
//!
//! Purpose: define the typed entities exchanged with the API, the request
//! lifecycle and error classification shared by every screen. Nothing in
//! this module performs I/O; adapters live in `outbound`.
//!
//! Public surface:
//! - ApiError / ErrorCode: failure returned by every API port.
//! - ErrorStore: subscribable classifier of request failures.
//! - Route / RoutePolicy / Page: typed route table and auth gating.
//! - RequestState: per-entity request lifecycle.
//! - User, Patient, DataRecord, Message: API entities.

pub mod auth;
pub mod error;
pub mod error_store;
pub mod message;
pub mod metrics;
pub mod notification;
pub mod patient;
pub mod patient_data;
pub mod ports;
pub mod request_events;
pub mod request_state;
pub mod route;
pub mod subscribers;
pub mod user;
pub mod validation;

pub use self::auth::{LoginCredentials, LoginValidationError, SignupDetails};
pub use self::error::{ApiError, ApiErrorValidationError, ErrorCode};
pub use self::error_store::ErrorStore;
pub use self::message::{Message, MessageThread, NewMessage};
pub use self::metrics::MetricEvent;
pub use self::notification::{Notification, NotificationAction, NotificationKind};
pub use self::patient::{
    NewPatient, Patient, PatientId, PatientIdValidationError, PatientPatch, validate_patient,
};
pub use self::patient_data::{DataRecord, ProcessedData, merge_records};
pub use self::request_events::{ErrorContext, ErrorKey, ErrorRecord, RequestEvent};
pub use self::request_state::RequestState;
pub use self::route::{Page, Route, RouteParseError, RoutePolicy};
pub use self::subscribers::{Listener, SubscriptionId, Subscribers};
pub use self::user::{PatientRef, User, UserPatch, UserUpdate, validate_user};
pub use self::validation::ValidationErrors;

/// Result alias used by every API port.
///
/// # Examples
/// ```
/// use client::domain::{ApiError, ApiResult};
///
/// fn lookup() -> ApiResult<u32> {
///     Err(ApiError::not_found("no such patient"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, ApiError>;
