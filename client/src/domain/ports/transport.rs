//! Adapter-side failures that happen before an API answer is available.
//!
//! Outbound adapters raise these and convert them into [`ApiError`] at the
//! boundary, so the controller only ever sees one error type.

use crate::domain::ApiError;

use super::define_port_error;

define_port_error! {
    /// Transport and decoding failures of an API adapter.
    pub enum TransportError {
        /// The request never reached the server.
        Connection { message: String } => "API connection failed: {message}",
        /// The server did not answer in time.
        Timeout { message: String } => "API request timed out: {message}",
        /// The server answered with an unexpected body.
        Decode { message: String } => "API response could not be decoded: {message}",
        /// The server rejected the request.
        Status { status: u16, message: String } => "API answered {status}: {message}",
    }
}

impl From<TransportError> for ApiError {
    fn from(value: TransportError) -> Self {
        match value {
            TransportError::Status { status, message } => ApiError::from_status(status, message),
            TransportError::Timeout { .. } | TransportError::Connection { .. } => {
                ApiError::unavailable(value.to_string())
            }
            TransportError::Decode { .. } => ApiError::internal(value.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(TransportError::status(404_u16, "missing"), ErrorCode::NotFound, Some(404))]
    #[case(TransportError::status(401_u16, "expired"), ErrorCode::Unauthorized, Some(401))]
    #[case(TransportError::timeout("GET /metadata"), ErrorCode::Unavailable, None)]
    #[case(TransportError::connection("refused"), ErrorCode::Unavailable, None)]
    #[case(TransportError::decode("expected value"), ErrorCode::InternalError, Some(500))]
    fn converts_into_api_errors(
        #[case] error: TransportError,
        #[case] code: ErrorCode,
        #[case] status: Option<u16>,
    ) {
        let api: ApiError = error.into();
        assert_eq!(api.code(), code);
        assert_eq!(api.status(), status);
    }
}
