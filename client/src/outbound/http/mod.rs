//! Reqwest-backed adapter for the platform REST API.
//!
//! This adapter owns transport details only: endpoint construction, the
//! session token header, timeout and HTTP error mapping, and JSON decoding
//! into domain types. One [`HttpApi`] implements every API port so they share
//! a connection pool and the session.

mod dto;
mod ports;

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;
use zeroize::Zeroizing;

use self::dto::ErrorBodyDto;
use crate::domain::ports::TransportError;

/// Header carrying the session token on requests and login responses.
pub const SESSION_TOKEN_HEADER: &str = "x-tidepool-session-token";

/// Platform API client holding the current session token.
pub struct HttpApi {
    client: Client,
    base: Url,
    session: RwLock<Option<Zeroizing<String>>>,
}

/// Headers and body of a successful response.
struct Reply {
    headers: HeaderMap,
    body: Vec<u8>,
}

impl HttpApi {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base,
            session: RwLock::new(None),
        })
    }

    /// Resume a session persisted by an earlier run.
    #[must_use]
    pub fn with_session(self, token: impl Into<String>) -> Self {
        self.store_token(Some(token.into()));
        self
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, TransportError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| {
                TransportError::connection(format!("{} cannot be used as an API base", self.base))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn token(&self) -> Option<Zeroizing<String>> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store_token(&self, token: Option<String>) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = token.map(Zeroizing::new);
    }

    fn has_session(&self) -> bool {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token() {
            Some(token) => request.header(SESSION_TOKEN_HEADER, token.as_str()),
            None => request,
        }
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Reply, TransportError> {
        let response = self
            .authorize(request)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(Reply {
            headers,
            body: body.to_vec(),
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, TransportError> {
        let reply = self.execute(request).await?;
        decode(&reply.body)
    }
}

impl std::fmt::Debug for HttpApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpApi")
            .field("base", &self.base.as_str())
            .field("authenticated", &self.has_session())
            .finish_non_exhaustive()
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, TransportError> {
    serde_json::from_slice(body)
        .map_err(|error| TransportError::decode(format!("invalid API JSON payload: {error}")))
}

fn session_token(headers: &HeaderMap) -> Result<String, TransportError> {
    headers
        .get(SESSION_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .map(str::to_owned)
        .ok_or_else(|| TransportError::decode("response carried no session token"))
}

fn map_transport_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::timeout(error.to_string())
    } else if error.is_decode() {
        TransportError::decode(error.to_string())
    } else {
        TransportError::connection(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> TransportError {
    let detail = serde_json::from_slice::<ErrorBodyDto>(body)
        .ok()
        .and_then(ErrorBodyDto::into_message)
        .unwrap_or_else(|| body_preview(body));
    let message = if detail.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), detail)
    };
    TransportError::status(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network mapping helpers.

    use super::*;
    use crate::domain::ports::UserApi;
    use crate::domain::{ApiError, ErrorCode};
    use reqwest::header::HeaderValue;
    use rstest::{fixture, rstest};

    #[fixture]
    fn api() -> HttpApi {
        let base = Url::parse("https://api.example.org/v1/").expect("valid base");
        HttpApi::new(base, Duration::from_secs(5)).expect("client builds")
    }

    #[rstest]
    fn endpoints_are_joined_under_the_base_path(api: HttpApi) {
        let url = api
            .endpoint(&["patients", "abc123", "data"])
            .expect("endpoint builds");
        assert_eq!(url.as_str(), "https://api.example.org/v1/patients/abc123/data");
    }

    #[rstest]
    fn endpoint_segments_are_escaped(api: HttpApi) {
        let url = api
            .endpoint(&["message", "thread", "a/b c"])
            .expect("endpoint builds");
        assert_eq!(
            url.as_str(),
            "https://api.example.org/v1/message/thread/a%2Fb%20c"
        );
    }

    #[rstest]
    fn session_is_tracked_locally(api: HttpApi) {
        assert!(!api.is_authenticated());
        let resumed = api.with_session("token-1");
        assert!(resumed.is_authenticated());
        assert_eq!(resumed.token().as_deref().map(String::as_str), Some("token-1"));

        resumed.destroy_session();
        assert!(!resumed.is_authenticated());
    }

    #[rstest]
    #[case::not_found(StatusCode::NOT_FOUND, ErrorCode::NotFound)]
    #[case::unauthorized(StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized)]
    #[case::conflict(StatusCode::CONFLICT, ErrorCode::Conflict)]
    #[case::bad_request(StatusCode::BAD_REQUEST, ErrorCode::InvalidRequest)]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::InternalError)]
    fn maps_http_statuses_to_api_errors(#[case] status: StatusCode, #[case] code: ErrorCode) {
        let error: ApiError = map_status_error(status, b"<html>oops</html>").into();
        assert_eq!(error.code(), code);
        assert_eq!(error.status(), Some(status.as_u16()));
    }

    #[rstest]
    fn prefers_reason_from_json_error_bodies() {
        let error = map_status_error(
            StatusCode::CONFLICT,
            br#"{"code": 409, "reason": "User already exists"}"#,
        );
        assert_eq!(
            error,
            TransportError::status(409_u16, "status 409: User already exists")
        );
    }

    #[rstest]
    fn empty_bodies_fall_back_to_the_status() {
        let error = map_status_error(StatusCode::NOT_FOUND, b"  ");
        assert_eq!(error, TransportError::status(404_u16, "status 404"));
    }

    #[rstest]
    fn previews_are_compacted_and_capped() {
        let body = format!("line one\n\n   {}", "x".repeat(200));
        let preview = body_preview(body.as_bytes());
        assert!(preview.starts_with("line one x"));
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 163);
    }

    #[rstest]
    fn session_token_is_read_from_headers() {
        let mut headers = HeaderMap::new();
        assert!(matches!(
            session_token(&headers),
            Err(TransportError::Decode { .. })
        ));

        headers.insert(SESSION_TOKEN_HEADER, HeaderValue::from_static("abc"));
        assert_eq!(session_token(&headers).as_deref(), Ok("abc"));
    }

    #[rstest]
    fn malformed_payloads_are_decode_errors() {
        let result: Result<Vec<u32>, _> = decode(b"{\"not\": \"a list\"}");
        let error: ApiError = result.expect_err("decode fails").into();
        assert_eq!(error.code(), ErrorCode::InternalError);
    }
}
