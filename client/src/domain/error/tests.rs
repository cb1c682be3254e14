//! Tests for API error classification and serialisation.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(400, ErrorCode::InvalidRequest)]
#[case(401, ErrorCode::Unauthorized)]
#[case(403, ErrorCode::Forbidden)]
#[case(404, ErrorCode::NotFound)]
#[case(409, ErrorCode::Conflict)]
#[case(422, ErrorCode::InvalidRequest)]
#[case(500, ErrorCode::InternalError)]
#[case(503, ErrorCode::Unavailable)]
fn from_status_classifies_codes(#[case] status: u16, #[case] expected: ErrorCode) {
    let err = ApiError::from_status(status, "failed");
    assert_eq!(err.code(), expected);
    assert_eq!(err.status(), Some(status));
}

#[rstest]
fn from_status_substitutes_a_message_when_blank() {
    let err = ApiError::from_status(502, "  ");
    assert_eq!(err.message(), "status 502");
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = ApiError::try_new(ErrorCode::InvalidRequest, None, "   ");
    assert!(matches!(result, Err(ApiErrorValidationError::EmptyMessage)));
}

#[rstest]
fn convenience_constructors_carry_canonical_statuses() {
    assert!(ApiError::not_found("gone").is_not_found());
    assert!(ApiError::unauthorized("expired").is_unauthorized());
    assert_eq!(ApiError::conflict("taken").status(), Some(409));
    assert_eq!(ApiError::unavailable("offline").status(), None);
}

#[rstest]
fn display_includes_status_when_present() {
    assert_eq!(
        ApiError::internal("boom").to_string(),
        "boom (status 500)"
    );
    assert_eq!(ApiError::unavailable("offline").to_string(), "offline");
}

#[rstest]
fn stringify_produces_camel_case_json() {
    let err = ApiError::not_found("missing").with_details(json!({ "id": "abc123" }));
    let value: Value = serde_json::from_str(&err.stringify()).expect("valid json");
    assert_eq!(
        value,
        json!({
            "code": "not_found",
            "status": 404,
            "message": "missing",
            "details": { "id": "abc123" }
        })
    );
}

#[rstest]
fn deserialising_rejects_blank_messages() {
    let result: Result<ApiError, _> =
        serde_json::from_value(json!({ "code": "internal_error", "message": " " }));
    assert!(result.is_err());
}

#[rstest]
fn round_trips_through_json() {
    let err = ApiError::unavailable("connection reset");
    let decoded: ApiError =
        serde_json::from_value(serde_json::to_value(&err).expect("encode")).expect("decode");
    assert_eq!(decoded, err);
}
