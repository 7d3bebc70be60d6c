//! Administrator management of student accounts.
//!
//! ```text
//! POST   /api/admin/users              {"studentId":"stu01","name":"Ada Lovelace",...}
//! GET    /api/admin/users
//! PUT    /api/admin/users/{id}/toggle
//! DELETE /api/admin/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, NewPassword, NewStudent, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AdminAuth;
use crate::inbound::http::dto::{DeletedStudentResponse, UserResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, map_user_validation_error, parse_uuid};

const ID_FIELD: FieldName = FieldName::new("id");

/// Request body for `POST /api/admin/users`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct CreateStudentRequest {
    /// 4-20 characters of letters, digits, `_` or `-`.
    #[schema(example = "stu01")]
    pub student_id: String,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "CS")]
    pub department: String,
    #[schema(example = "2A")]
    pub class_level: String,
    /// At least six characters.
    #[schema(example = "secret1")]
    pub password: String,
}

impl CreateStudentRequest {
    fn into_command(self) -> Result<(NewStudent, NewPassword), Error> {
        let student = NewStudent::try_from_parts(
            &self.student_id,
            &self.name,
            &self.department,
            &self.class_level,
        )
        .map_err(|err| map_user_validation_error(&err))?;
        let password =
            NewPassword::new(&self.password).map_err(|err| map_user_validation_error(&err))?;
        Ok((student, password))
    }
}

fn user_id_from_path(raw: &str) -> Result<UserId, Error> {
    parse_uuid(raw, ID_FIELD).map(UserId::from)
}

/// Register an active student account.
#[utoipa::path(
    post,
    path = "/api/admin/users",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student created", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller is not an administrator", body = Error),
        (status = 409, description = "Student ID already exists", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "createStudent"
)]
#[post("/admin/users")]
pub async fn create_student(
    _auth: AdminAuth,
    state: web::Data<HttpState>,
    payload: web::Json<CreateStudentRequest>,
) -> ApiResult<HttpResponse> {
    let (student, password) = payload.into_inner().into_command()?;
    let user = state.students.create_student(student, password).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// List every student account, newest first.
#[utoipa::path(
    get,
    path = "/api/admin/users",
    responses(
        (status = 200, description = "Student accounts", body = [UserResponse]),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller is not an administrator", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "listStudents"
)]
#[get("/admin/users")]
pub async fn list_students(
    _auth: AdminAuth,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let students = state.students_query.list_students().await?;
    Ok(web::Json(students.iter().map(UserResponse::from).collect()))
}

/// Flip a student's active flag.
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}/toggle",
    params(("id" = String, Path, description = "User identifier (UUID)")),
    responses(
        (status = 200, description = "Updated account", body = UserResponse),
        (status = 400, description = "Invalid id or not a student", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller is not an administrator", body = Error),
        (status = 404, description = "Account not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "toggleStudent"
)]
#[put("/admin/users/{id}/toggle")]
pub async fn toggle_student(
    _auth: AdminAuth,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = user_id_from_path(&path.into_inner())?;
    let user = state.students.toggle_active(&id).await?;
    Ok(web::Json(UserResponse::from(&user)))
}

/// Permanently remove a student account. Their complaints are kept.
#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    params(("id" = String, Path, description = "User identifier (UUID)")),
    responses(
        (status = 200, description = "Student deleted", body = DeletedStudentResponse),
        (status = 400, description = "Invalid id or not a student", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller is not an administrator", body = Error),
        (status = 404, description = "Account not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "deleteStudent"
)]
#[delete("/admin/users/{id}")]
pub async fn delete_student(
    _auth: AdminAuth,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletedStudentResponse>> {
    let id = user_id_from_path(&path.into_inner())?;
    let deleted = state.students.delete_student(&id).await?;
    Ok(web::Json(DeletedStudentResponse::from(deleted)))
}
