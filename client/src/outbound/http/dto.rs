//! Wire payloads of the platform API that have no domain counterpart.

use serde::{Deserialize, Serialize};

use crate::domain::{Message, MessageThread, NewMessage, SignupDetails};

/// Error body returned alongside non-success statuses.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorBodyDto {
    #[serde(default)]
    pub(super) reason: Option<String>,
    #[serde(default)]
    pub(super) message: Option<String>,
}

impl ErrorBodyDto {
    pub(super) fn into_message(self) -> Option<String> {
        self.reason
            .or(self.message)
            .filter(|text| !text.trim().is_empty())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SignupRequestDto<'a> {
    pub(super) username: &'a str,
    pub(super) emails: [&'a str; 1],
    pub(super) password: &'a str,
    pub(super) full_name: &'a str,
}

impl<'a> From<&'a SignupDetails> for SignupRequestDto<'a> {
    fn from(details: &'a SignupDetails) -> Self {
        Self {
            username: details.username(),
            emails: [details.username()],
            password: details.password(),
            full_name: details.full_name(),
        }
    }
}

/// Envelope used by the message endpoints.
#[derive(Debug, Serialize)]
pub(super) struct MessageEnvelopeDto<'a> {
    pub(super) message: &'a NewMessage,
}

#[derive(Debug, Deserialize)]
pub(super) struct MessageDto {
    pub(super) message: Message,
}

#[derive(Debug, Deserialize)]
pub(super) struct MessagesDto {
    #[serde(default)]
    pub(super) messages: MessageThread,
}

#[derive(Debug, Serialize)]
pub(super) struct ErrorReportDto<'a> {
    pub(super) error: &'a str,
    pub(super) message: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct MetricDto {
    pub(super) event: &'static str,
}
