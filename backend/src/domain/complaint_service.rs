//! Complaint lifecycle service: filing, listing and status transitions.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::port_error_mapping::{
    map_complaint_persistence_error, map_user_persistence_error,
};
use crate::domain::ports::{ComplaintRepository, ComplaintsCommand, ComplaintsQuery, UserRepository};
use crate::domain::{
    Complaint, ComplaintId, ComplaintView, Error, Identity, NewComplaint, OwnerSummary,
    StatusUpdate, UserId,
};

/// Service implementing the complaint driving ports.
#[derive(Clone)]
pub struct ComplaintService<C, U> {
    complaints: Arc<C>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<C, U> ComplaintService<C, U> {
    /// Create a new service over the given repositories.
    pub fn new(complaints: Arc<C>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            complaints,
            users,
            clock,
        }
    }
}

impl<C, U> ComplaintService<C, U>
where
    C: ComplaintRepository,
    U: UserRepository,
{
    async fn resolve_owner(&self, owner: &UserId) -> Result<Option<OwnerSummary>, Error> {
        let user = self
            .users
            .find_by_id(owner)
            .await
            .map_err(map_user_persistence_error)?;
        Ok(user.as_ref().map(OwnerSummary::from))
    }
}

#[async_trait]
impl<C, U> ComplaintsCommand for ComplaintService<C, U>
where
    C: ComplaintRepository,
    U: UserRepository,
{
    async fn file_complaint(
        &self,
        owner: &Identity,
        draft: NewComplaint,
    ) -> Result<Complaint, Error> {
        let complaint = Complaint::file(ComplaintId::random(), owner.user_id, draft, self.clock.utc());
        self.complaints
            .insert(&complaint)
            .await
            .map_err(map_complaint_persistence_error)?;
        info!(complaint_id = %complaint.id, owner = %complaint.owner, "complaint filed");
        Ok(complaint)
    }

    async fn update_status(
        &self,
        id: &ComplaintId,
        update: StatusUpdate,
    ) -> Result<ComplaintView, Error> {
        let complaint = self
            .complaints
            .record_status(id, &update, self.clock.utc())
            .await
            .map_err(map_complaint_persistence_error)?
            .ok_or_else(|| Error::not_found("Complaint not found"))?;
        info!(
            complaint_id = %complaint.id,
            status = %complaint.status,
            "complaint status updated"
        );

        let owner = self.resolve_owner(&complaint.owner).await?;
        Ok(ComplaintView { complaint, owner })
    }
}

#[async_trait]
impl<C, U> ComplaintsQuery for ComplaintService<C, U>
where
    C: ComplaintRepository,
    U: UserRepository,
{
    async fn list_mine(&self, owner: &UserId) -> Result<Vec<Complaint>, Error> {
        self.complaints
            .list_by_owner(owner)
            .await
            .map_err(map_complaint_persistence_error)
    }

    async fn list_all(&self) -> Result<Vec<ComplaintView>, Error> {
        let complaints = self
            .complaints
            .list_all()
            .await
            .map_err(map_complaint_persistence_error)?;

        let mut seen = HashSet::new();
        let owner_ids: Vec<UserId> = complaints
            .iter()
            .map(|complaint| complaint.owner)
            .filter(|owner| seen.insert(*owner))
            .collect();
        let owners: HashMap<UserId, OwnerSummary> = self
            .users
            .find_by_ids(&owner_ids)
            .await
            .map_err(map_user_persistence_error)?
            .iter()
            .map(|user| (user.id, OwnerSummary::from(user)))
            .collect();

        Ok(complaints
            .into_iter()
            .map(|complaint| {
                let owner = owners.get(&complaint.owner).cloned();
                ComplaintView { complaint, owner }
            })
            .collect())
    }
}
