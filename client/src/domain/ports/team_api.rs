//! Port for care team notes and message threads.
//!
//! Notes come back as [`DataRecord`]s of type `message` so they can be merged
//! with device data on the timeline.

use async_trait::async_trait;

use crate::domain::{ApiResult, DataRecord, Message, MessageThread, NewMessage, PatientId};

/// Care team messaging operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamApi: Send + Sync {
    /// Fetch thread starters for the patient as timeline records.
    async fn get_notes(&self, patient_id: &PatientId) -> ApiResult<Vec<DataRecord>>;

    /// Fetch every message of a thread, oldest first.
    async fn get_message_thread(&self, thread_id: &str) -> ApiResult<MessageThread>;

    /// Append a reply to an existing thread.
    async fn reply_to_message_thread(&self, message: &NewMessage) -> ApiResult<Message>;

    /// Start a new thread.
    async fn start_message_thread(&self, message: &NewMessage) -> ApiResult<Message>;
}
