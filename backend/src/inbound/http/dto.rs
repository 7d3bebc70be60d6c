//! Response bodies shared by the HTTP handlers.
//!
//! Domain aggregates stay free of wire concerns; these types pick the fields
//! clients may see. In particular no user body ever carries a password hash.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::DeletedStudent;
use crate::domain::{
    Category, Complaint, ComplaintId, ComplaintStatus, ComplaintView, OwnerSummary, Role,
    StatusEntry, User, UserId,
};

/// Safe projection of a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub role: Role,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "stu01")]
    pub student_id: Option<String>,
    pub email: Option<String>,
    #[schema(example = "CS")]
    pub department: Option<String>,
    #[schema(example = "2A")]
    pub class_level: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            role: user.role,
            name: user.name.to_string(),
            student_id: user.student_id.as_ref().map(ToString::to_string),
            email: user.email.as_ref().map(ToString::to_string),
            department: user.department.clone(),
            class_level: user.class_level.clone(),
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Body returned by `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Bearer token valid for seven days.
    pub token: String,
    pub user: UserResponse,
}

/// Confirmation returned by `DELETE /api/admin/users/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedStudentResponse {
    #[schema(example = "Student deleted")]
    pub message: String,
    pub id: UserId,
    pub student_id: Option<String>,
    pub name: String,
}

impl From<DeletedStudent> for DeletedStudentResponse {
    fn from(deleted: DeletedStudent) -> Self {
        Self {
            message: "Student deleted".to_owned(),
            id: deleted.id,
            student_id: deleted.student_id.map(|id| id.to_string()),
            name: deleted.name.to_string(),
        }
    }
}

/// A complaint as seen by its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintResponse {
    pub id: ComplaintId,
    /// Account that filed the complaint.
    pub owner_id: UserId,
    pub category: Category,
    #[schema(example = "Wifi down")]
    pub title: String,
    #[schema(example = "Lab 3 offline")]
    pub description: String,
    pub status: ComplaintStatus,
    /// Append-only timeline, oldest first.
    pub status_history: Vec<StatusEntry>,
    pub admin_note: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Complaint> for ComplaintResponse {
    fn from(complaint: Complaint) -> Self {
        Self {
            id: complaint.id,
            owner_id: complaint.owner,
            category: complaint.category,
            title: complaint.title,
            description: complaint.description,
            status: complaint.status,
            status_history: complaint.status_history,
            admin_note: complaint.admin_note,
            created_at: complaint.created_at,
            updated_at: complaint.updated_at,
        }
    }
}

/// Owner details shown to administrators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintOwnerResponse {
    pub id: UserId,
    pub name: String,
    pub email: Option<String>,
    pub student_id: Option<String>,
}

impl From<OwnerSummary> for ComplaintOwnerResponse {
    fn from(owner: OwnerSummary) -> Self {
        Self {
            id: owner.id,
            name: owner.name,
            email: owner.email.map(|email| email.to_string()),
            student_id: owner.student_id.map(|id| id.to_string()),
        }
    }
}

/// A complaint with its owner resolved, as seen by administrators.
///
/// `student` is `null` when the owning account has been deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AdminComplaintResponse {
    #[serde(flatten)]
    pub complaint: ComplaintResponse,
    pub student: Option<ComplaintOwnerResponse>,
}

impl From<ComplaintView> for AdminComplaintResponse {
    fn from(view: ComplaintView) -> Self {
        Self {
            complaint: view.complaint.into(),
            student: view.owner.map(Into::into),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::test_fixtures::{complaint_for, student};
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    fn user_response_never_carries_the_hash() {
        let user = student("stu01", true);
        let value = serde_json::to_value(UserResponse::from(&user)).expect("serialises");
        let object = value.as_object().expect("object");
        assert!(!object.contains_key("passwordHash"));
        assert!(!object.contains_key("password_hash"));
        assert_eq!(object.get("studentId"), Some(&json!("stu01")));
        assert_eq!(object.get("isActive"), Some(&json!(true)));
        assert_eq!(object.get("role"), Some(&json!("student")));
    }

    #[rstest]
    fn admin_complaint_flattens_and_resolves_owner() {
        let owner = student("stu01", true);
        let view = ComplaintView {
            complaint: complaint_for(owner.id),
            owner: Some(OwnerSummary::from(&owner)),
        };
        let value = serde_json::to_value(AdminComplaintResponse::from(view)).expect("serialises");
        assert_eq!(value["status"], json!("Pending"));
        assert_eq!(value["ownerId"], json!(owner.id.to_string()));
        assert_eq!(value["student"]["name"], json!("Ada Lovelace"));
        assert_eq!(value["student"]["studentId"], json!("stu01"));
    }

    #[rstest]
    fn deleted_owner_serialises_as_null_student() {
        let view = ComplaintView {
            complaint: complaint_for(UserId::random()),
            owner: None,
        };
        let value = serde_json::to_value(AdminComplaintResponse::from(view)).expect("serialises");
        assert_eq!(value.get("student"), Some(&Value::Null));
    }

    #[rstest]
    fn status_history_uses_wire_names() {
        let owner = student("stu01", true);
        let value = serde_json::to_value(ComplaintResponse::from(complaint_for(owner.id)))
            .expect("serialises");
        assert_eq!(value["statusHistory"][0]["status"], json!("Pending"));
        assert!(value["statusHistory"][0]["date"].is_string());
    }
}
