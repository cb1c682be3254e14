//! Single-slot user-facing notification banner.

use serde::Serialize;

/// Visual severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Neutral confirmation or hint.
    Info,
    /// Something failed; the user may retry.
    Error,
    /// Blocking problem that needs an action.
    Alert,
}

/// Action a notification offers besides dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationAction {
    /// Drop the local session and return to the login screen.
    LogBackIn,
}

/// Generic guidance shown for unexpected API failures.
pub const GENERIC_ERROR_BODY: &str = "Sorry! Something went wrong. It's our fault, not yours. \
We're going to go investigate. For the time being, go ahead and refresh your browser.";

/// Body shown when the backend rejects the session.
pub const SESSION_EXPIRED_BODY: &str =
    "To keep your data safe we logged you out. Click here to log back in.";

/// Transient banner; at most one is visible at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Severity used for styling.
    pub kind: NotificationKind,
    /// Main text.
    pub body: String,
    /// Secondary technical detail, such as the original error message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Extra action offered by the banner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<NotificationAction>,
    /// Whether the user may close the banner.
    pub is_dismissable: bool,
}

impl Notification {
    /// Dismissable informational banner.
    pub fn info(body: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            body: body.into(),
            detail: None,
            action: None,
            is_dismissable: true,
        }
    }

    /// Dismissable error banner with retry guidance and the original error.
    pub fn generic_error(original_error_message: Option<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            body: GENERIC_ERROR_BODY.to_owned(),
            detail: original_error_message
                .filter(|message| !message.is_empty())
                .map(|message| format!("Original error message: {message}")),
            action: None,
            is_dismissable: true,
        }
    }

    /// Non-dismissable alert forcing the user to log back in.
    pub fn session_expired() -> Self {
        Self {
            kind: NotificationKind::Alert,
            body: SESSION_EXPIRED_BODY.to_owned(),
            detail: None,
            action: Some(NotificationAction::LogBackIn),
            is_dismissable: false,
        }
    }
}
