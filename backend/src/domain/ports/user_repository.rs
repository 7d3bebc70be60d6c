//! Port abstraction for account persistence adapters and their errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Email, Role, StudentId, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The store's unique index on student identifiers rejected a write.
        DuplicateStudentId { student_id: String } =>
            "student id already registered: {student_id}",
        /// The store's unique index on emails rejected a write.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// Port for reading and writing account records.
///
/// Uniqueness of student identifiers and emails is enforced by the adapter;
/// absent values never collide.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch the account whose student identifier equals `student_id` or whose
    /// email equals `email`.
    async fn find_by_login(
        &self,
        student_id: &str,
        email: &str,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch an account by student identifier.
    async fn find_by_student_id(
        &self,
        student_id: &StudentId,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch an account by email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch every account whose id appears in `ids`; unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError>;

    /// List accounts holding `role`, newest first.
    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, UserPersistenceError>;

    /// Set the active flag. Returns `false` when no account matched.
    async fn set_active(
        &self,
        id: &UserId,
        is_active: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, UserPersistenceError>;

    /// Hard-delete an account. Returns `false` when no account matched.
    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError>;
}
