//! Subscribable classifier of request failures.
//!
//! The store holds at most one [`ErrorRecord`]. Every dispatched event
//! notifies subscribers synchronously after the state change; listeners
//! receive no payload and re-read [`ErrorStore::current`]. The store is an
//! explicit object shared through `Arc`, so tests and multiple controllers
//! never share hidden global state.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::domain::request_events::{ErrorRecord, RequestEvent};
use crate::domain::subscribers::{SubscriptionId, Subscribers};

/// Central error state for request failures.
///
/// # Examples
/// ```
/// use client::domain::{ApiError, ErrorKey, ErrorStore, RequestEvent};
///
/// let store = ErrorStore::new();
/// store.dispatch(RequestEvent::FailedLogout {
///     error: ApiError::internal("boom"),
/// });
/// assert_eq!(store.current().map(|record| record.key), Some(ErrorKey::FailedLogout));
///
/// store.dispatch(RequestEvent::CompletedLogout);
/// assert!(store.current().is_none());
/// ```
#[derive(Debug, Default)]
pub struct ErrorStore {
    error: Mutex<Option<ErrorRecord>>,
    subscribers: Subscribers,
}

impl ErrorStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<ErrorRecord>> {
        self.error.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current error record, if any.
    pub fn current(&self) -> Option<ErrorRecord> {
        self.lock().clone()
    }

    /// Whether an error is recorded.
    pub fn has_error(&self) -> bool {
        self.lock().is_some()
    }

    /// Apply an event and notify subscribers.
    pub fn dispatch(&self, event: RequestEvent) {
        {
            let mut error = self.lock();
            match &event {
                RequestEvent::DismissedRequestError | RequestEvent::CompletedLogout => {
                    *error = None;
                }
                failure if failure.is_expected_failure() => {
                    debug!(?failure, "request failure left to the initiating form");
                }
                failure => {
                    if let Some(record) = failure.to_record() {
                        debug!(key = record.key.as_str(), "recording request error");
                        *error = Some(record);
                    }
                }
            }
        }
        self.subscribers.notify();
    }

    /// Register a change listener.
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }
}
