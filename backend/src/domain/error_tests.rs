//! Tests for the domain error payload.

use super::*;
use rstest::rstest;
use serde_json::json;
use uuid::Uuid;

#[rstest]
#[case(ErrorCode::InvalidRequest, "invalid request")]
#[case(ErrorCode::NotFound, "not found")]
#[case(ErrorCode::Conflict, "conflict")]
#[case(ErrorCode::ServiceUnavailable, "service unavailable")]
fn blank_messages_fall_back_to_code_text(#[case] code: ErrorCode, #[case] expected: &str) {
    let err = Error::new(code, "   ");
    assert_eq!(err.message(), expected);
    assert_eq!(err.code(), code);
}

#[rstest]
fn serialises_camel_case_and_omits_empty_fields() {
    let err = Error::not_found("Course not found.");
    let value = serde_json::to_value(&err).expect("serialise error");
    assert_eq!(value, json!({ "code": "not_found", "message": "Course not found." }));
}

#[rstest]
fn details_and_trace_id_round_trip_through_json() {
    let err = Error::invalid_request("missing required field: courseId")
        .with_details(json!({ "field": "courseId", "code": "missing_field" }))
        .with_trace_id("00000000-0000-0000-0000-000000000000");
    let text = serde_json::to_string(&err).expect("serialise error");
    assert!(text.contains("\"traceId\""));
    let decoded: Error = serde_json::from_str(&text).expect("deserialise error");
    assert_eq!(decoded, err);
}

#[tokio::test]
async fn captures_trace_id_inside_request_scope() {
    let trace_id = TraceId::from_uuid(Uuid::new_v4());
    let err = TraceId::scope(trace_id, async { Error::internal("boom") }).await;
    assert_eq!(err.trace_id(), Some(trace_id.to_string().as_str()));
}

#[rstest]
fn display_uses_message() {
    assert_eq!(Error::conflict("duplicate").to_string(), "duplicate");
}
