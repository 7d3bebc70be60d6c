//! Driving ports for the complaint lifecycle.

use async_trait::async_trait;

use crate::domain::{
    Complaint, ComplaintId, ComplaintView, Error, Identity, NewComplaint, StatusUpdate, UserId,
};

/// Mutating complaint use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplaintsCommand: Send + Sync {
    /// File a complaint owned by the authenticated student.
    async fn file_complaint(
        &self,
        owner: &Identity,
        draft: NewComplaint,
    ) -> Result<Complaint, Error>;

    /// Move a complaint to a new status and append it to the timeline.
    async fn update_status(
        &self,
        id: &ComplaintId,
        update: StatusUpdate,
    ) -> Result<ComplaintView, Error>;
}

/// Read-only complaint use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplaintsQuery: Send + Sync {
    /// Complaints owned by `owner`, newest first.
    async fn list_mine(&self, owner: &UserId) -> Result<Vec<Complaint>, Error>;

    /// Every complaint with its owner resolved, newest first.
    async fn list_all(&self) -> Result<Vec<ComplaintView>, Error>;
}
