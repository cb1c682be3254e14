//! Usage telemetry event names.

use std::fmt;

use serde::Serialize;

/// Usage event tracked through the metrics port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum MetricEvent {
    /// Successful login.
    LoggedIn,
    /// Logout requested.
    LoggedOut,
    /// Account created.
    SignedUp,
    /// Account page shown.
    ViewedAccountEdit,
    /// Patient list shown.
    ViewedCareTeamList,
    /// Patient profile shown.
    ViewedProfile,
    /// Profile creation form shown.
    ViewedProfileCreate,
    /// Profile edit form shown.
    ViewedProfileEdit,
    /// Data page shown.
    ViewedData,
    /// Account changes saved.
    UpdatedAccount,
    /// Profile changes saved.
    UpdatedProfile,
}

impl MetricEvent {
    /// Event name as reported to the metrics backend.
    pub const fn name(self) -> &'static str {
        match self {
            Self::LoggedIn => "Logged In",
            Self::LoggedOut => "Logged Out",
            Self::SignedUp => "Signed Up",
            Self::ViewedAccountEdit => "Viewed Account Edit",
            Self::ViewedCareTeamList => "Viewed Care Team List",
            Self::ViewedProfile => "Viewed Profile",
            Self::ViewedProfileCreate => "Viewed Profile Create",
            Self::ViewedProfileEdit => "Viewed Profile Edit",
            Self::ViewedData => "Viewed Data",
            Self::UpdatedAccount => "Updated Account",
            Self::UpdatedProfile => "Updated Profile",
        }
    }
}

impl From<MetricEvent> for String {
    fn from(value: MetricEvent) -> Self {
        value.name().to_owned()
    }
}

impl fmt::Display for MetricEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
