//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and never
//! leave it. Conversion to and from domain types lives in the repositories.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{complaints, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub role: String,
    pub name: String,
    pub student_id: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub class_level: Option<String>,
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub role: &'a str,
    pub name: &'a str,
    pub student_id: Option<&'a str>,
    pub email: Option<&'a str>,
    pub department: Option<&'a str>,
    pub class_level: Option<&'a str>,
    pub password_hash: &'a str,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the complaints table.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = complaints)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ComplaintRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub category: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub status_history: serde_json::Value,
    pub admin_note: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating complaint records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = complaints)]
pub(crate) struct NewComplaintRow<'a> {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub category: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub status: &'a str,
    pub status_history: serde_json::Value,
    pub admin_note: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
