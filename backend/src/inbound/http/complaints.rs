//! Complaint lifecycle handlers.
//!
//! ```text
//! POST /api/complaints               (student) {"category":"IT","title":"..","description":".."}
//! GET  /api/complaints/mine          (student)
//! GET  /api/complaints               (admin)
//! PUT  /api/complaints/{id}/status   (admin)   {"status":"In Progress","adminNote":".."}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{
    ComplaintId, ComplaintValidationError, Error, NewComplaint, StatusUpdate,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{AdminAuth, StudentAuth};
use crate::inbound::http::dto::{AdminComplaintResponse, ComplaintResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, map_complaint_validation_error, parse_uuid};

const ID_FIELD: FieldName = FieldName::new("id");

/// Request body for `POST /api/complaints`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default, deny_unknown_fields)]
pub struct CreateComplaintRequest {
    /// One of `Academic`, `Facility`, `IT`, `Other`.
    #[schema(example = "IT")]
    pub category: String,
    #[schema(example = "Wifi down")]
    pub title: String,
    #[schema(example = "Lab 3 offline")]
    pub description: String,
}

impl TryFrom<CreateComplaintRequest> for NewComplaint {
    type Error = ComplaintValidationError;

    fn try_from(value: CreateComplaintRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.category, &value.title, &value.description)
    }
}

/// Request body for `PUT /api/complaints/{id}/status`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    /// One of `Pending`, `In Progress`, `Resolved`.
    #[schema(example = "In Progress")]
    pub status: String,
    /// Replaces the current note; omitted means empty.
    #[schema(example = "Technician assigned")]
    pub admin_note: Option<String>,
}

impl TryFrom<UpdateStatusRequest> for StatusUpdate {
    type Error = ComplaintValidationError;

    fn try_from(value: UpdateStatusRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.status, value.admin_note.as_deref())
    }
}

/// File a complaint owned by the calling student.
#[utoipa::path(
    post,
    path = "/api/complaints",
    request_body = CreateComplaintRequest,
    responses(
        (status = 201, description = "Complaint filed", body = ComplaintResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller is not a student", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["complaints"],
    operation_id = "createComplaint"
)]
#[post("/complaints")]
pub async fn create_complaint(
    auth: StudentAuth,
    state: web::Data<HttpState>,
    payload: web::Json<CreateComplaintRequest>,
) -> ApiResult<HttpResponse> {
    let draft = NewComplaint::try_from(payload.into_inner())
        .map_err(|err| map_complaint_validation_error(&err))?;
    let complaint = state
        .complaints
        .file_complaint(auth.identity(), draft)
        .await?;
    Ok(HttpResponse::Created().json(ComplaintResponse::from(complaint)))
}

/// List the calling student's complaints, newest first.
#[utoipa::path(
    get,
    path = "/api/complaints/mine",
    responses(
        (status = 200, description = "Own complaints", body = [ComplaintResponse]),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller is not a student", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["complaints"],
    operation_id = "listMyComplaints"
)]
#[get("/complaints/mine")]
pub async fn list_my_complaints(
    auth: StudentAuth,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ComplaintResponse>>> {
    let complaints = state
        .complaints_query
        .list_mine(&auth.identity().user_id)
        .await?;
    Ok(web::Json(
        complaints.into_iter().map(ComplaintResponse::from).collect(),
    ))
}

/// List every complaint with its owner resolved, newest first.
#[utoipa::path(
    get,
    path = "/api/complaints",
    responses(
        (status = 200, description = "All complaints", body = [AdminComplaintResponse]),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller is not an administrator", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["complaints"],
    operation_id = "listComplaints"
)]
#[get("/complaints")]
pub async fn list_complaints(
    _auth: AdminAuth,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<AdminComplaintResponse>>> {
    let views = state.complaints_query.list_all().await?;
    Ok(web::Json(
        views.into_iter().map(AdminComplaintResponse::from).collect(),
    ))
}

/// Move a complaint to a new status and record it on the timeline.
#[utoipa::path(
    put,
    path = "/api/complaints/{id}/status",
    params(("id" = String, Path, description = "Complaint identifier (UUID)")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Complaint updated", body = AdminComplaintResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller is not an administrator", body = Error),
        (status = 404, description = "Complaint not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["complaints"],
    operation_id = "updateComplaintStatus"
)]
#[put("/complaints/{id}/status")]
pub async fn update_complaint_status(
    _auth: AdminAuth,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateStatusRequest>,
) -> ApiResult<web::Json<AdminComplaintResponse>> {
    let id = ComplaintId::from(parse_uuid(&path.into_inner(), ID_FIELD)?);
    let update = StatusUpdate::try_from(payload.into_inner())
        .map_err(|err| map_complaint_validation_error(&err))?;
    let view = state.complaints.update_status(&id, update).await?;
    Ok(web::Json(AdminComplaintResponse::from(view)))
}

#[cfg(test)]
mod tests;
