//! In-memory implementation of the [`ComplaintRepository`] port.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{ComplaintPersistenceError, ComplaintRepository};
use crate::domain::{Complaint, ComplaintId, StatusUpdate, UserId};

use super::newest_first;

/// Complaint store held in a mutex-guarded vector, in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryComplaintRepository {
    complaints: Mutex<Vec<Complaint>>,
}

impl InMemoryComplaintRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Complaint>>, ComplaintPersistenceError> {
        self.complaints
            .lock()
            .map_err(|_| ComplaintPersistenceError::query("complaint store lock poisoned"))
    }
}

#[async_trait]
impl ComplaintRepository for InMemoryComplaintRepository {
    async fn insert(&self, complaint: &Complaint) -> Result<(), ComplaintPersistenceError> {
        self.lock()?.push(complaint.clone());
        Ok(())
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Complaint>, ComplaintPersistenceError> {
        let mut complaints: Vec<Complaint> = self
            .lock()?
            .iter()
            .filter(|complaint| complaint.owner == *owner)
            .cloned()
            .collect();
        newest_first(&mut complaints, |complaint| complaint.created_at);
        Ok(complaints)
    }

    async fn list_all(&self) -> Result<Vec<Complaint>, ComplaintPersistenceError> {
        let mut complaints = self.lock()?.clone();
        newest_first(&mut complaints, |complaint| complaint.created_at);
        Ok(complaints)
    }

    async fn record_status(
        &self,
        id: &ComplaintId,
        update: &StatusUpdate,
        at: DateTime<Utc>,
    ) -> Result<Option<Complaint>, ComplaintPersistenceError> {
        let mut complaints = self.lock()?;
        Ok(complaints
            .iter_mut()
            .find(|stored| stored.id == *id)
            .map(|stored| {
                stored.apply(update.clone(), at);
                stored.clone()
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_fixtures::complaint_for;
    use crate::domain::ComplaintStatus;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn list_by_owner_excludes_other_students() {
        let repo = InMemoryComplaintRepository::new();
        let mine = UserId::random();
        let theirs = UserId::random();
        repo.insert(&complaint_for(mine)).await.expect("insert");
        repo.insert(&complaint_for(theirs)).await.expect("insert");

        let listed = repo.list_by_owner(&mine).await.expect("list");
        assert_eq!(listed.len(), 1);
        assert!(listed.iter().all(|complaint| complaint.owner == mine));
    }

    #[rstest]
    #[tokio::test]
    async fn list_all_puts_latest_insert_first_on_equal_timestamps() {
        let repo = InMemoryComplaintRepository::new();
        let first = complaint_for(UserId::random());
        let second = complaint_for(UserId::random());
        repo.insert(&first).await.expect("insert");
        repo.insert(&second).await.expect("insert");

        let ids: Vec<ComplaintId> = repo
            .list_all()
            .await
            .expect("list")
            .into_iter()
            .map(|complaint| complaint.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    fn resolve(note: &str) -> StatusUpdate {
        StatusUpdate {
            status: ComplaintStatus::Resolved,
            admin_note: note.to_owned(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn record_status_persists_lifecycle_fields() {
        let repo = InMemoryComplaintRepository::new();
        let complaint = complaint_for(UserId::random());
        repo.insert(&complaint).await.expect("insert");

        let returned = repo
            .record_status(&complaint.id, &resolve("fixed"), complaint.created_at)
            .await
            .expect("record")
            .expect("present");
        let stored = repo
            .list_all()
            .await
            .expect("list")
            .into_iter()
            .find(|stored| stored.id == complaint.id)
            .expect("present");

        assert_eq!(stored, returned);
        assert_eq!(stored.status, ComplaintStatus::Resolved);
        assert_eq!(stored.status_history.len(), 2);
        assert_eq!(stored.admin_note, "fixed");
    }

    #[rstest]
    #[tokio::test]
    async fn record_status_seeds_legacy_history() {
        let repo = InMemoryComplaintRepository::new();
        let mut legacy = complaint_for(UserId::random());
        legacy.status_history.clear();
        repo.insert(&legacy).await.expect("insert");

        let updated = repo
            .record_status(&legacy.id, &resolve(""), legacy.created_at)
            .await
            .expect("record")
            .expect("present");

        let statuses: Vec<ComplaintStatus> = updated
            .status_history
            .iter()
            .map(|entry| entry.status)
            .collect();
        assert_eq!(statuses, vec![ComplaintStatus::Pending, ComplaintStatus::Resolved]);
    }

    #[rstest]
    #[tokio::test]
    async fn record_status_reports_missing_complaint() {
        let repo = InMemoryComplaintRepository::new();
        let outcome = repo
            .record_status(&ComplaintId::random(), &resolve(""), Utc::now())
            .await
            .expect("record");
        assert!(outcome.is_none());
    }
}
