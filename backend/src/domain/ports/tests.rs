//! Regression coverage for port error messages and mock wiring.

use super::*;
use crate::domain::PasswordHash;
use rstest::rstest;

#[rstest]
#[case(
    UserPersistenceError::duplicate_student_id("stu01"),
    "student id already registered: stu01"
)]
#[case(
    UserPersistenceError::duplicate_email("admin@campus.edu"),
    "email already registered: admin@campus.edu"
)]
#[case(
    UserPersistenceError::connection("refused"),
    "user repository connection failed: refused"
)]
fn user_persistence_errors_render_context(
    #[case] error: UserPersistenceError,
    #[case] expected: &str,
) {
    assert_eq!(error.to_string(), expected);
}

#[rstest]
fn token_errors_support_unit_variants() {
    assert_eq!(TokenError::expired(), TokenError::Expired);
    assert_eq!(TokenError::expired().to_string(), "token expired");
    assert_eq!(
        TokenError::invalid("bad signature").to_string(),
        "invalid token: bad signature"
    );
}

#[rstest]
fn password_hasher_mock_is_usable_as_trait_object() {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .withf(|password, hash| password == "secret1" && hash.as_str() == "stored")
        .return_const(Ok(true));

    let hasher: &dyn PasswordHasher = &hasher;
    let verified = hasher
        .verify("secret1", &PasswordHash::new("stored"))
        .expect("mock verifies");
    assert!(verified);
}

#[rstest]
#[tokio::test]
async fn complaint_repository_mock_reports_missing_rows() {
    let mut repo = MockComplaintRepository::new();
    repo.expect_record_status().return_once(|_, _, _| Ok(None));

    let update = crate::domain::StatusUpdate::try_from_parts("Resolved", None)
        .expect("valid update");
    let found = repo
        .record_status(&crate::domain::ComplaintId::random(), &update, chrono::Utc::now())
        .await
        .expect("update runs");
    assert!(found.is_none());
}
