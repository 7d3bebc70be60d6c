//! Port abstraction for complaint persistence adapters and their errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Complaint, ComplaintId, StatusUpdate, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by complaint repository adapters.
    pub enum ComplaintPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "complaint repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "complaint repository query failed: {message}",
    }
}

/// Port for reading and writing complaints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplaintRepository: Send + Sync {
    /// Persist a newly filed complaint.
    async fn insert(&self, complaint: &Complaint) -> Result<(), ComplaintPersistenceError>;

    /// List complaints owned by `owner`, newest first.
    async fn list_by_owner(&self, owner: &UserId)
    -> Result<Vec<Complaint>, ComplaintPersistenceError>;

    /// List every complaint, newest first.
    async fn list_all(&self) -> Result<Vec<Complaint>, ComplaintPersistenceError>;

    /// Apply `update` to the stored complaint as one atomic step and return the
    /// result. The history gains exactly one `{status, at}` entry, after the
    /// current status when the stored history is empty. Returns `None` when no
    /// complaint matched.
    async fn record_status(
        &self,
        id: &ComplaintId,
        update: &StatusUpdate,
        at: DateTime<Utc>,
    ) -> Result<Option<Complaint>, ComplaintPersistenceError>;
}
