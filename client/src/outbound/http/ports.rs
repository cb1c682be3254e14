//! Port implementations for [`HttpApi`].

use async_trait::async_trait;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use super::dto::{
    ErrorReportDto, MessageDto, MessageEnvelopeDto, MessagesDto, MetricDto, SignupRequestDto,
};
use super::{HttpApi, session_token};
use crate::domain::ports::{
    ErrorLog, ErrorLogError, Metrics, PatientApi, PatientDataApi, TeamApi, UserApi,
};
use crate::domain::{
    ApiError, ApiResult, DataRecord, LoginCredentials, Message, MessageThread, MetricEvent,
    NewMessage, NewPatient, Patient, PatientId, SignupDetails, User, UserUpdate,
};

#[async_trait]
impl UserApi for HttpApi {
    async fn get(&self) -> ApiResult<User> {
        let url = self.endpoint(&["auth", "user"])?;
        Ok(self.fetch(self.client.get(url)).await?)
    }

    async fn put(&self, update: &UserUpdate) -> ApiResult<User> {
        let url = self.endpoint(&["auth", "user"])?;
        Ok(self.fetch(self.client.put(url).json(update)).await?)
    }

    async fn login(&self, credentials: &LoginCredentials) -> ApiResult<()> {
        let url = self.endpoint(&["auth", "login"])?;
        let request = self
            .client
            .post(url)
            .basic_auth(credentials.username(), Some(credentials.password()));
        let reply = self.execute(request).await?;
        let token = session_token(&reply.headers)?;
        self.store_token(Some(token));
        debug!(remember = credentials.remember(), "session opened");
        Ok(())
    }

    async fn logout(&self) -> ApiResult<()> {
        let url = self.endpoint(&["auth", "logout"])?;
        self.execute(self.client.post(url)).await?;
        self.store_token(None);
        Ok(())
    }

    async fn signup(&self, details: &SignupDetails) -> ApiResult<User> {
        let url = self.endpoint(&["auth", "user"])?;
        let request = self
            .client
            .post(url)
            .json(&SignupRequestDto::from(details));
        let reply = self.execute(request).await?;
        let token = session_token(&reply.headers)?;
        let user: User = super::decode(&reply.body)?;
        self.store_token(Some(token));
        Ok(user)
    }

    fn is_authenticated(&self) -> bool {
        self.has_session()
    }

    fn destroy_session(&self) {
        self.store_token(None);
    }
}

#[async_trait]
impl PatientApi for HttpApi {
    async fn get(&self, patient_id: &PatientId) -> ApiResult<Patient> {
        let url = self.endpoint(&["patients", patient_id.as_str()])?;
        Ok(self.fetch(self.client.get(url)).await?)
    }

    async fn get_all(&self) -> ApiResult<Vec<Patient>> {
        let url = self.endpoint(&["patients"])?;
        Ok(self.fetch(self.client.get(url)).await?)
    }

    async fn post(&self, patient: &NewPatient) -> ApiResult<Patient> {
        let url = self.endpoint(&["patients"])?;
        Ok(self.fetch(self.client.post(url).json(patient)).await?)
    }

    async fn put(&self, patient_id: &PatientId, patient: &NewPatient) -> ApiResult<Patient> {
        let url = self.endpoint(&["patients", patient_id.as_str()])?;
        Ok(self.fetch(self.client.put(url).json(patient)).await?)
    }
}

#[async_trait]
impl PatientDataApi for HttpApi {
    async fn get(&self, patient_id: &PatientId) -> ApiResult<Vec<DataRecord>> {
        let url = self.endpoint(&["data", patient_id.as_str()])?;
        Ok(self.fetch(self.client.get(url)).await?)
    }
}

#[async_trait]
impl TeamApi for HttpApi {
    async fn get_notes(&self, patient_id: &PatientId) -> ApiResult<Vec<DataRecord>> {
        let url = self.endpoint(&["message", "notes", patient_id.as_str()])?;
        let notes: MessagesDto = self.fetch(self.client.get(url)).await?;
        Ok(notes
            .messages
            .into_iter()
            .map(Message::into_note_record)
            .collect())
    }

    async fn get_message_thread(&self, thread_id: &str) -> ApiResult<MessageThread> {
        let url = self.endpoint(&["message", "thread", thread_id])?;
        let thread: MessagesDto = self.fetch(self.client.get(url)).await?;
        Ok(thread.messages)
    }

    async fn reply_to_message_thread(&self, message: &NewMessage) -> ApiResult<Message> {
        let Some(parent) = message.parent_message.as_deref() else {
            return Err(ApiError::invalid_request("a reply needs a parent message"));
        };
        let url = self.endpoint(&["message", "reply", parent])?;
        let stored: MessageDto = self
            .fetch(self.client.post(url).json(&MessageEnvelopeDto { message }))
            .await?;
        Ok(stored.message)
    }

    async fn start_message_thread(&self, message: &NewMessage) -> ApiResult<Message> {
        let url = self.endpoint(&["message", "send", message.group_id.as_str()])?;
        let stored: MessageDto = self
            .fetch(self.client.post(url).json(&MessageEnvelopeDto { message }))
            .await?;
        Ok(stored.message)
    }
}

#[async_trait]
impl ErrorLog for HttpApi {
    async fn log(&self, error: String, context: &str) -> Result<(), ErrorLogError> {
        let report = ErrorReportDto {
            error: &error,
            message: context,
        };
        let delivered = match self.endpoint(&["errors"]) {
            Ok(url) => self.execute(self.client.post(url).json(&report)).await,
            Err(err) => Err(err),
        };
        delivered
            .map(drop)
            .map_err(|err| ErrorLogError::delivery(err.to_string()))
    }
}

impl Metrics for HttpApi {
    fn track(&self, event: MetricEvent) {
        let Ok(runtime) = Handle::try_current() else {
            debug!(event = event.name(), "no async runtime; metric dropped");
            return;
        };
        let url = match self.endpoint(&["metrics"]) {
            Ok(url) => url,
            Err(error) => {
                warn!(%error, event = event.name(), "metric endpoint unavailable");
                return;
            }
        };
        let request = self.authorize(self.client.post(url)).json(&MetricDto {
            event: event.name(),
        });
        runtime.spawn(async move {
            match request.send().await {
                Ok(response) if response.status().is_success() => {}
                Ok(response) => debug!(
                    status = response.status().as_u16(),
                    event = event.name(),
                    "metric rejected"
                ),
                Err(error) => debug!(%error, event = event.name(), "metric delivery failed"),
            }
        });
    }
}
