//! Translation of driven-port failures into domain errors.
//!
//! Connection failures become `service_unavailable`; anything else the caller
//! cannot act on becomes `internal`. Unique-index violations always surface as
//! `conflict`, whether the pre-check or the store caught them.

use serde_json::json;
use tracing::error;

use super::Error;
use super::ports::{ComplaintPersistenceError, PasswordHashError, TokenError, UserPersistenceError};

pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateStudentId { student_id } => {
            duplicate_student_id(&student_id)
        }
        UserPersistenceError::DuplicateEmail { email } => duplicate_email(&email),
    }
}

pub(crate) fn map_complaint_persistence_error(error: ComplaintPersistenceError) -> Error {
    match error {
        ComplaintPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("complaint repository unavailable: {message}"))
        }
        ComplaintPersistenceError::Query { message } => {
            Error::internal(format!("complaint repository error: {message}"))
        }
    }
}

pub(crate) fn map_password_hash_error(error: PasswordHashError) -> Error {
    error!(%error, "password hashing failed");
    Error::internal(error.to_string())
}

pub(crate) fn map_token_issue_error(error: TokenError) -> Error {
    error!(%error, "token issuance failed");
    Error::internal(error.to_string())
}

pub(crate) fn duplicate_student_id(student_id: &str) -> Error {
    Error::conflict("Student ID already exists").with_details(json!({
        "field": "studentId",
        "value": student_id,
        "code": "duplicate",
    }))
}

pub(crate) fn duplicate_email(email: &str) -> Error {
    Error::conflict("Email already exists").with_details(json!({
        "field": "email",
        "value": email,
        "code": "duplicate",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
    #[case(UserPersistenceError::duplicate_student_id("stu01"), ErrorCode::Conflict)]
    #[case(UserPersistenceError::duplicate_email("a@b.c"), ErrorCode::Conflict)]
    fn user_errors_map_to_codes(#[case] error: UserPersistenceError, #[case] code: ErrorCode) {
        assert_eq!(map_user_persistence_error(error).code(), code);
    }

    #[rstest]
    #[case(ComplaintPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(ComplaintPersistenceError::query("syntax"), ErrorCode::InternalError)]
    fn complaint_errors_map_to_codes(
        #[case] error: ComplaintPersistenceError,
        #[case] code: ErrorCode,
    ) {
        assert_eq!(map_complaint_persistence_error(error).code(), code);
    }

    #[rstest]
    fn duplicate_details_name_the_field() {
        let error = map_user_persistence_error(UserPersistenceError::duplicate_student_id("stu01"));
        assert_eq!(
            error.details(),
            Some(&json!({"field": "studentId", "value": "stu01", "code": "duplicate"}))
        );
    }
}
