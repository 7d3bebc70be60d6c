//! Complaint aggregate and its status lifecycle.
//!
//! A complaint starts `Pending` with a one-entry history. Administrators may
//! move it to any status in any order; every move appends a timeline entry so
//! the last entry always mirrors the current status.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::{Email, StudentId, User, UserId};

/// Validation errors raised while building complaint commands.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComplaintValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("category must be one of Academic, Facility, IT, Other")]
    UnknownCategory,
    #[error("status must be one of Pending, In Progress, Resolved")]
    UnknownStatus,
    #[error("complaint id must be a valid UUID")]
    InvalidId,
}

impl ComplaintValidationError {
    /// Name of the request field the error relates to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field } => *field,
            Self::UnknownCategory => "category",
            Self::UnknownStatus => "status",
            Self::InvalidId => "id",
        }
    }
}

/// Stable complaint identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, format = Uuid)]
pub struct ComplaintId(Uuid);

impl ComplaintId {
    /// Validate and construct a [`ComplaintId`] from its textual form.
    ///
    /// # Errors
    /// Returns [`ComplaintValidationError::InvalidId`] for non-UUID input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ComplaintValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| ComplaintValidationError::InvalidId)
    }

    /// Generate a new random [`ComplaintId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ComplaintId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Complaint category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Category {
    Academic,
    Facility,
    #[serde(rename = "IT")]
    It,
    Other,
}

impl Category {
    /// Wire and storage representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Academic => "Academic",
            Self::Facility => "Facility",
            Self::It => "IT",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ComplaintValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Academic" => Ok(Self::Academic),
            "Facility" => Ok(Self::Facility),
            "IT" => Ok(Self::It),
            "Other" => Ok(Self::Other),
            _ => Err(ComplaintValidationError::UnknownCategory),
        }
    }
}

/// Complaint lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ComplaintStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
}

impl ComplaintStatus {
    /// Wire and storage representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintStatus {
    type Err = ComplaintValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "In Progress" => Ok(Self::InProgress),
            "Resolved" => Ok(Self::Resolved),
            _ => Err(ComplaintValidationError::UnknownStatus),
        }
    }
}

/// One entry of the append-only status timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusEntry {
    pub status: ComplaintStatus,
    pub date: DateTime<Utc>,
}

/// Validated payload for filing a complaint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComplaint {
    pub category: Category,
    pub title: String,
    pub description: String,
}

impl NewComplaint {
    /// Validate raw complaint fields, trimming title and description.
    ///
    /// # Errors
    /// Returns the first missing or unknown field.
    ///
    /// # Examples
    /// ```
    /// use complaints::domain::{Category, NewComplaint};
    ///
    /// let draft = NewComplaint::try_from_parts("IT", " Wifi down ", "Lab 3 offline").unwrap();
    /// assert_eq!(draft.category, Category::It);
    /// assert_eq!(draft.title, "Wifi down");
    /// ```
    pub fn try_from_parts(
        category: &str,
        title: &str,
        description: &str,
    ) -> Result<Self, ComplaintValidationError> {
        let category = category.trim();
        if category.is_empty() {
            return Err(ComplaintValidationError::MissingField { field: "category" });
        }
        Ok(Self {
            category: category.parse()?,
            title: required_text(title, "title")?,
            description: required_text(description, "description")?,
        })
    }
}

fn required_text(value: &str, field: &'static str) -> Result<String, ComplaintValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ComplaintValidationError::MissingField { field });
    }
    Ok(trimmed.to_owned())
}

/// Validated administrator status transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub status: ComplaintStatus,
    pub admin_note: String,
}

impl StatusUpdate {
    /// Validate a transition request. An omitted note becomes empty.
    ///
    /// # Errors
    /// Rejects a missing or unknown status.
    pub fn try_from_parts(
        status: &str,
        admin_note: Option<&str>,
    ) -> Result<Self, ComplaintValidationError> {
        if status.trim().is_empty() {
            return Err(ComplaintValidationError::MissingField { field: "status" });
        }
        Ok(Self {
            status: status.trim().parse()?,
            admin_note: admin_note.unwrap_or_default().to_owned(),
        })
    }
}

/// Complaint aggregate.
///
/// ## Invariants
/// - `status_history` is append-only.
/// - The last history entry's status equals `status` (legacy rows with an
///   empty history are seeded on their next transition).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Complaint {
    pub id: ComplaintId,
    pub owner: UserId,
    pub category: Category,
    pub title: String,
    pub description: String,
    pub status: ComplaintStatus,
    pub status_history: Vec<StatusEntry>,
    pub admin_note: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Complaint {
    /// File a new complaint owned by `owner`, seeded with a `Pending` entry.
    #[must_use]
    pub fn file(id: ComplaintId, owner: UserId, draft: NewComplaint, now: DateTime<Utc>) -> Self {
        let NewComplaint {
            category,
            title,
            description,
        } = draft;
        Self {
            id,
            owner,
            category,
            title,
            description,
            status: ComplaintStatus::Pending,
            status_history: vec![StatusEntry {
                status: ComplaintStatus::Pending,
                date: now,
            }],
            admin_note: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an administrator transition and append it to the timeline.
    ///
    /// Any status may follow any other, including itself.
    pub fn apply(&mut self, update: StatusUpdate, now: DateTime<Utc>) {
        if self.status_history.is_empty() {
            // Legacy rows predate the timeline; record where they stood.
            self.status_history.push(StatusEntry {
                status: self.status,
                date: self.updated_at,
            });
        }
        self.status = update.status;
        self.admin_note = update.admin_note;
        self.status_history.push(StatusEntry {
            status: update.status,
            date: now,
        });
        self.updated_at = now;
    }
}

/// Owner details resolved for administrator views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerSummary {
    pub id: UserId,
    pub name: String,
    pub email: Option<Email>,
    pub student_id: Option<StudentId>,
}

impl From<&User> for OwnerSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.to_string(),
            email: user.email.clone(),
            student_id: user.student_id.clone(),
        }
    }
}

/// Complaint with its owner resolved; `owner` is `None` once the account is
/// deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintView {
    pub complaint: Complaint,
    pub owner: Option<OwnerSummary>,
}
