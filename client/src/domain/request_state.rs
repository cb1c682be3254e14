//! Per-entity request lifecycle.

use serde::Serialize;

use crate::domain::ApiError;

/// Where a fetched entity stands.
///
/// Replaces a `fetching` flag paired with an optional value: an entity is
/// either untouched, in flight, present, or failed, never two at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum RequestState<T> {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request returned this value.
    Loaded(T),
    /// The last request failed.
    Failed(ApiError),
}

impl<T> RequestState<T> {
    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Whether the last request finished, successfully or not.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Loaded(_) | Self::Failed(_))
    }

    /// The loaded value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }
}
