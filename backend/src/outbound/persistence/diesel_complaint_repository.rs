//! PostgreSQL-backed `ComplaintRepository` implementation using Diesel ORM.
//!
//! The status timeline is stored as a JSONB array of `{status, date}` objects
//! and decoded through the domain types on read. Status transitions append to
//! it inside a single `UPDATE`, so concurrent transitions never drop entries.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel::sql_query;
use diesel::sql_types::{Jsonb, Text, Timestamptz, Uuid as SqlUuid};
use diesel_async::RunQueryDsl;
use serde_json::Value;

use crate::domain::ports::{ComplaintPersistenceError, ComplaintRepository};
use crate::domain::{Complaint, ComplaintId, StatusEntry, StatusUpdate, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ComplaintRow, NewComplaintRow};
use super::pool::{DbPool, PoolError};
use super::schema::complaints;

/// Diesel-backed implementation of the `ComplaintRepository` port.
#[derive(Clone)]
pub struct DieselComplaintRepository {
    pool: DbPool,
}

impl DieselComplaintRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

// Legacy rows with an empty history are seeded with their current status
// before the new entry is appended.
const RECORD_STATUS_SQL: &str = r"
UPDATE complaints
SET
    status_history = (
        CASE
            WHEN jsonb_array_length(status_history) = 0
                THEN jsonb_build_array(
                    jsonb_build_object('status', status, 'date', updated_at)
                )
            ELSE status_history
        END
    ) || $3,
    status = $1,
    admin_note = $2,
    updated_at = $4
WHERE id = $5
RETURNING id, owner_id, category, title, description, status, status_history,
    admin_note, created_at, updated_at
";

fn pool_error(error: PoolError) -> ComplaintPersistenceError {
    map_pool_error(error, ComplaintPersistenceError::connection)
}

fn diesel_error(error: &DieselError) -> ComplaintPersistenceError {
    map_diesel_error(
        error,
        ComplaintPersistenceError::query,
        ComplaintPersistenceError::connection,
    )
}

fn history_to_json(history: &[StatusEntry]) -> Result<Value, ComplaintPersistenceError> {
    serde_json::to_value(history).map_err(|err| {
        ComplaintPersistenceError::query(format!("failed to encode status history: {err}"))
    })
}

fn row_to_complaint(row: ComplaintRow) -> Result<Complaint, ComplaintPersistenceError> {
    let id = row.id;
    let invalid = |what: &str, err: &dyn std::fmt::Display| {
        ComplaintPersistenceError::query(format!("invalid stored complaint {id}: {what}: {err}"))
    };
    Ok(Complaint {
        id: ComplaintId::from(id),
        owner: UserId::from(row.owner_id),
        category: row
            .category
            .parse()
            .map_err(|err| invalid("category", &err))?,
        title: row.title,
        description: row.description,
        status: row.status.parse().map_err(|err| invalid("status", &err))?,
        status_history: serde_json::from_value(row.status_history)
            .map_err(|err| invalid("status history", &err))?,
        admin_note: row.admin_note,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn rows_to_complaints(rows: Vec<ComplaintRow>) -> Result<Vec<Complaint>, ComplaintPersistenceError> {
    rows.into_iter().map(row_to_complaint).collect()
}

#[async_trait]
impl ComplaintRepository for DieselComplaintRepository {
    async fn insert(&self, complaint: &Complaint) -> Result<(), ComplaintPersistenceError> {
        let row = NewComplaintRow {
            id: *complaint.id.as_uuid(),
            owner_id: *complaint.owner.as_uuid(),
            category: complaint.category.as_str(),
            title: &complaint.title,
            description: &complaint.description,
            status: complaint.status.as_str(),
            status_history: history_to_json(&complaint.status_history)?,
            admin_note: &complaint.admin_note,
            created_at: complaint.created_at,
            updated_at: complaint.updated_at,
        };
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(complaints::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| diesel_error(&err))
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Complaint>, ComplaintPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows = complaints::table
            .filter(complaints::owner_id.eq(*owner.as_uuid()))
            .order(complaints::created_at.desc())
            .select(ComplaintRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| diesel_error(&err))?;
        rows_to_complaints(rows)
    }

    async fn list_all(&self) -> Result<Vec<Complaint>, ComplaintPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows = complaints::table
            .order(complaints::created_at.desc())
            .select(ComplaintRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| diesel_error(&err))?;
        rows_to_complaints(rows)
    }

    async fn record_status(
        &self,
        id: &ComplaintId,
        update: &StatusUpdate,
        at: DateTime<Utc>,
    ) -> Result<Option<Complaint>, ComplaintPersistenceError> {
        let entry = history_to_json(&[StatusEntry {
            status: update.status,
            date: at,
        }])?;
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        sql_query(RECORD_STATUS_SQL)
            .bind::<Text, _>(update.status.as_str())
            .bind::<Text, _>(&update.admin_note)
            .bind::<Jsonb, _>(entry)
            .bind::<Timestamptz, _>(at)
            .bind::<SqlUuid, _>(*id.as_uuid())
            .get_result::<ComplaintRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| diesel_error(&err))?
            .map(row_to_complaint)
            .transpose()
    }
}
