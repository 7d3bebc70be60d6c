//! Driving ports for administrator management of student accounts.

use async_trait::async_trait;

use crate::domain::{Error, NewPassword, NewStudent, PersonName, StudentId, User, UserId};

/// Confirmation returned after a student account is removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedStudent {
    pub id: UserId,
    pub student_id: Option<StudentId>,
    pub name: PersonName,
}

/// Mutating use-cases over student accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentAccountsCommand: Send + Sync {
    /// Register an active student account.
    async fn create_student(&self, student: NewStudent, password: NewPassword)
    -> Result<User, Error>;

    /// Flip the active flag of a student account.
    async fn toggle_active(&self, id: &UserId) -> Result<User, Error>;

    /// Remove a student account.
    async fn delete_student(&self, id: &UserId) -> Result<DeletedStudent, Error>;
}

/// Read-only use-cases over student accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentAccountsQuery: Send + Sync {
    /// List every student account, newest first.
    async fn list_students(&self) -> Result<Vec<User>, Error>;
}
