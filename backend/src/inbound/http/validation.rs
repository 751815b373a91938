//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies deserialise into DTOs with optional fields so missing
//! values can be reported with `{field, code: "missing_field"}` details
//! instead of serde's generic message.

use std::str::FromStr;

use serde_json::json;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidValue,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidValue => "invalid_value",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ErrorCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {name}"),
    )
}

pub(crate) fn invalid_value_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ErrorCode::InvalidValue,
        format!("invalid value for {name}: {value}"),
    )
}

/// Unwrap a required body field.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Parse an optional query parameter, treating blank input as absent.
pub(crate) fn parse_optional<T: FromStr>(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<T>, Error> {
    match value.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| invalid_value_error(field, raw)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CourseLevel, ErrorCode as DomainCode};
    use rstest::rstest;

    const LEVEL: FieldName = FieldName::new("level");

    #[rstest]
    fn missing_field_reports_field_and_code() {
        let err = require::<i64>(None, FieldName::new("trainerUserId")).expect_err("missing");

        assert_eq!(err.code(), DomainCode::InvalidRequest);
        assert_eq!(err.message(), "missing required field: trainerUserId");
        assert_eq!(
            err.details(),
            Some(&json!({"field": "trainerUserId", "code": "missing_field"}))
        );
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some("  "), None)]
    #[case(Some("Advanced"), Some(CourseLevel::Advanced))]
    fn optional_values_parse_or_skip(
        #[case] raw: Option<&str>,
        #[case] expected: Option<CourseLevel>,
    ) {
        assert_eq!(parse_optional::<CourseLevel>(raw, LEVEL).expect("parse"), expected);
    }

    #[rstest]
    fn unknown_values_are_invalid() {
        let err = parse_optional::<CourseLevel>(Some("Expert"), LEVEL).expect_err("invalid");
        assert_eq!(
            err.details(),
            Some(&json!({"field": "level", "code": "invalid_value"}))
        );
    }
}
