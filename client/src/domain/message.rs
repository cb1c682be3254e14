//! Team message threads attached to patient data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::patient::PatientId;
use crate::domain::patient_data::{DataRecord, NOTE_RECORD_TYPE};

/// One message in a team note thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Backend identifier.
    pub id: String,
    /// Thread root this replies to; `None` for a root.
    #[serde(rename = "parentmessage", default, skip_serializing_if = "Option::is_none")]
    pub parent_message: Option<String>,
    /// Author account.
    #[serde(rename = "userid")]
    pub user_id: String,
    /// Patient whose team the thread belongs to.
    #[serde(rename = "groupid")]
    pub group_id: PatientId,
    /// Time the message refers to on the timeline.
    pub timestamp: DateTime<Utc>,
    /// Body text.
    #[serde(rename = "messagetext")]
    pub message_text: String,
}

impl Message {
    /// Timeline record for this message, so notes can be merged with device
    /// data.
    pub fn into_note_record(self) -> DataRecord {
        let mut extra = Map::new();
        if let Some(parent) = self.parent_message {
            extra.insert("parentmessage".to_owned(), Value::String(parent));
        }
        extra.insert("userid".to_owned(), Value::String(self.user_id));
        extra.insert(
            "groupid".to_owned(),
            Value::String(self.group_id.as_str().to_owned()),
        );
        extra.insert("messagetext".to_owned(), Value::String(self.message_text));
        DataRecord {
            id: self.id,
            kind: NOTE_RECORD_TYPE.to_owned(),
            time: self.timestamp,
            value: None,
            extra,
        }
    }
}

/// Root message followed by its replies, oldest first.
pub type MessageThread = Vec<Message>;

/// Message composed by the viewer, either a thread root or a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    /// Thread root to reply to; `None` starts a thread.
    #[serde(rename = "parentmessage", default, skip_serializing_if = "Option::is_none")]
    pub parent_message: Option<String>,
    /// Patient whose team receives the message.
    #[serde(rename = "groupid")]
    pub group_id: PatientId,
    /// Time the message refers to.
    pub timestamp: DateTime<Utc>,
    /// Body text.
    #[serde(rename = "messagetext")]
    pub message_text: String,
}

impl NewMessage {
    /// Stored message for this draft once the backend has issued an id.
    pub fn into_message(self, id: impl Into<String>, user_id: impl Into<String>) -> Message {
        Message {
            id: id.into(),
            parent_message: self.parent_message,
            user_id: user_id.into(),
            group_id: self.group_id,
            timestamp: self.timestamp,
            message_text: self.message_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn notes_become_timeline_records() {
        let message = NewMessage {
            parent_message: None,
            group_id: PatientId::new("abc123").expect("valid id"),
            timestamp: Utc
                .with_ymd_and_hms(2026, 10, 1, 9, 30, 0)
                .single()
                .expect("valid time"),
            message_text: "Pump site changed".to_owned(),
        }
        .into_message("m-1", "u-1");

        let record = message.into_note_record();
        assert!(record.is_note());
        assert_eq!(record.id, "m-1");
        assert_eq!(record.extra.get("messagetext"), Some(&json!("Pump site changed")));
        assert_eq!(record.extra.get("groupid"), Some(&json!("abc123")));
        assert!(!record.extra.contains_key("parentmessage"));
    }
}
