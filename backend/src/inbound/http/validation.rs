//! Shared validation helpers for inbound HTTP adapters.
//!
//! Path and body values are parsed here so handlers hand typed ids and uids
//! to the domain. Failures carry a `details` object naming the field.

use std::str::FromStr;

use serde_json::json;

use crate::domain::{Error, Uid};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidUid,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidUid => "invalid_uid",
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

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid, value)
}

/// Parse a UUID-backed document id such as `ListId`.
pub(crate) fn parse_id<T: FromStr>(value: &str, field: FieldName) -> Result<T, Error> {
    T::from_str(value).map_err(|_| invalid_uuid_error(field, value))
}

/// Parse an optional document id, treating absence as `None`.
pub(crate) fn parse_optional_id<T: FromStr>(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<T>, Error> {
    value.map(|raw| parse_id(raw, field)).transpose()
}

pub(crate) fn parse_uid(value: String, field: FieldName) -> Result<Uid, Error> {
    Uid::new(value.clone()).map_err(|err| {
        let name = field.as_str();
        ValidationError::new(name, format!("{name} is not a valid uid: {err}"))
            .with_value(ErrorCode::InvalidUid, value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode as DomainCode, ListId};
    use rstest::rstest;

    const LIST_ID: FieldName = FieldName::new("listId");

    #[rstest]
    fn parses_valid_ids() {
        let id: ListId =
            parse_id("3fa85f64-5717-4562-b3fc-2c963f66afa6", LIST_ID).expect("valid id");
        assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[rstest]
    fn invalid_ids_name_the_field() {
        let err = parse_id::<ListId>("nope", LIST_ID).expect_err("invalid id");
        assert_eq!(err.code(), DomainCode::InvalidRequest);
        let details = err.details().expect("details");
        assert_eq!(details["field"], "listId");
        assert_eq!(details["code"], "invalid_uuid");
        assert_eq!(details["value"], "nope");
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some("3fa85f64-5717-4562-b3fc-2c963f66afa6"), true)]
    #[case(Some("bad"), false)]
    fn optional_ids_accept_absence(#[case] raw: Option<&str>, #[case] ok: bool) {
        assert_eq!(parse_optional_id::<ListId>(raw, LIST_ID).is_ok(), ok);
    }

    #[rstest]
    fn blank_uids_are_rejected() {
        let err = parse_uid(String::new(), FieldName::new("uid")).expect_err("blank uid");
        assert_eq!(err.details().expect("details")["code"], "invalid_uid");
    }

    #[rstest]
    fn missing_fields_report_the_name() {
        let err = missing_field_error(FieldName::new("title"));
        assert_eq!(err.message(), "missing required field: title");
    }
}
