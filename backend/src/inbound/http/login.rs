//! Login handler exchanging credentials for a bearer token.
//!
//! ```text
//! POST /api/auth/login {"identifier":"stu01","password":"secret1"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::no_store_header;
use crate::inbound::http::dto::{LoginResponse, UserResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_login_validation_error;

/// Login request body for `POST /api/auth/login`.
///
/// `identifier` is a student identifier or an administrator email; the
/// legacy field name `studentId` is accepted as an alias.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default, deny_unknown_fields)]
pub struct LoginRequest {
    #[serde(alias = "studentId")]
    #[schema(example = "stu01")]
    pub identifier: String,
    #[schema(example = "secret1")]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.identifier, &value.password)
    }
}

/// Authenticate a student or administrator and issue a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 403, description = "Account disabled", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(payload.into_inner())
        .map_err(|err| map_login_validation_error(&err))?;
    let outcome = state.login.login(&credentials).await?;
    Ok(HttpResponse::Ok()
        .insert_header(no_store_header())
        .json(LoginResponse {
            token: outcome.token,
            user: UserResponse::from(&outcome.user),
        }))
}
