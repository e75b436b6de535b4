//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every rejection is an `invalid_request` error whose details name the
//! offending field and a stable machine-readable code.

use serde_json::json;

use crate::domain::{Error, MealId, MealValidationError, UserValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    EmptyValue,
    TooLong,
    InvalidEmail,
    InvalidUuid,
    InvalidTimestamp,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::EmptyValue => "empty_value",
            ErrorCode::TooLong => "too_long",
            ErrorCode::InvalidEmail => "invalid_email",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
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

    fn as_str(&self) -> &'static str {
        self.0
    }
}

pub(crate) const NAME: FieldName = FieldName::new("name");
pub(crate) const EMAIL: FieldName = FieldName::new("email");
pub(crate) const DATETIME: FieldName = FieldName::new("datetime");
pub(crate) const MEAL_ID: FieldName = FieldName::new("id");

fn field_error(field: FieldName, code: ErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

fn field_value_error(
    field: FieldName,
    code: ErrorCode,
    message: impl Into<String>,
    value: impl Into<String>,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value.into(),
        "code": code.as_str(),
    }))
}

/// Map a user validation failure onto the request field that caused it.
pub(crate) fn user_validation_error(err: UserValidationError) -> Error {
    let message = err.to_string();
    match err {
        UserValidationError::EmptyName => field_error(NAME, ErrorCode::EmptyValue, message),
        UserValidationError::NameTooLong { .. } => field_error(NAME, ErrorCode::TooLong, message),
        UserValidationError::EmptyEmail => field_error(EMAIL, ErrorCode::EmptyValue, message),
        UserValidationError::EmailTooLong { .. } => {
            field_error(EMAIL, ErrorCode::TooLong, message)
        }
        UserValidationError::InvalidEmail => field_error(EMAIL, ErrorCode::InvalidEmail, message),
        UserValidationError::EmptyId
        | UserValidationError::InvalidId
        | UserValidationError::EmptySessionToken => Error::invalid_request(message),
    }
}

/// Map a meal validation failure onto the request field that caused it.
pub(crate) fn meal_validation_error(err: MealValidationError) -> Error {
    let message = err.to_string();
    match err {
        MealValidationError::TimestampOutOfRange { millis } => field_value_error(
            DATETIME,
            ErrorCode::InvalidTimestamp,
            message,
            millis.to_string(),
        ),
        MealValidationError::InvalidId => field_error(MEAL_ID, ErrorCode::InvalidUuid, message),
    }
}

pub(crate) fn invalid_timestamp_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    field_value_error(
        field,
        ErrorCode::InvalidTimestamp,
        format!("{name} must be an RFC 3339 timestamp or epoch milliseconds"),
        value,
    )
}

/// Parse a meal id path segment.
pub(crate) fn parse_meal_id(value: &str) -> Result<MealId, Error> {
    MealId::new(value).map_err(|_| {
        field_value_error(
            MEAL_ID,
            ErrorCode::InvalidUuid,
            "id must be a valid UUID",
            value,
        )
    })
}
