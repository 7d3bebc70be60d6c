//! Shared validation helpers for inbound HTTP adapters.
//!
//! Domain validation errors become `invalid_request` responses whose details
//! name the offending field and a stable machine-readable code.

use actix_web::HttpRequest;
use actix_web::error::JsonPayloadError;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{ComplaintValidationError, Error, LoginValidationError, UserValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidValue,
    InvalidUuid,
    InvalidJson,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidValue => "invalid_value",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidJson => "invalid_json",
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

fn field_error(field: &str, code: ErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidUuid.as_str(),
    }))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

pub(crate) fn map_user_validation_error(err: &UserValidationError) -> Error {
    let code = match err {
        UserValidationError::EmptyStudentId
        | UserValidationError::EmptyEmail
        | UserValidationError::EmptyName
        | UserValidationError::MissingField { .. } => ErrorCode::MissingField,
        UserValidationError::InvalidId => ErrorCode::InvalidUuid,
        _ => ErrorCode::InvalidValue,
    };
    field_error(err.field(), code, err.to_string())
}

pub(crate) fn map_complaint_validation_error(err: &ComplaintValidationError) -> Error {
    let code = match err {
        ComplaintValidationError::MissingField { .. } => ErrorCode::MissingField,
        ComplaintValidationError::InvalidId => ErrorCode::InvalidUuid,
        ComplaintValidationError::UnknownCategory | ComplaintValidationError::UnknownStatus => {
            ErrorCode::InvalidValue
        }
    };
    field_error(err.field(), code, err.to_string())
}

pub(crate) fn map_login_validation_error(err: &LoginValidationError) -> Error {
    let field = match err {
        LoginValidationError::EmptyIdentifier => "identifier",
        LoginValidationError::EmptyPassword => "password",
    };
    field_error(field, ErrorCode::MissingField, err.to_string())
}

/// `JsonConfig` error handler turning body parse failures into
/// `invalid_request` payloads.
pub(crate) fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = req.path(), error = %err, "rejected request body");
    let message = match &err {
        JsonPayloadError::Deserialize(inner) => format!("invalid request body: {inner}"),
        JsonPayloadError::ContentType => "expected an application/json body".to_owned(),
        _ => "invalid request body".to_owned(),
    };
    Error::invalid_request(message)
        .with_details(json!({"code": ErrorCode::InvalidJson.as_str()}))
        .into()
}
