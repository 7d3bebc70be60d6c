//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer
//! - **Schemas**: request and response bodies plus the shared error envelope
//! - **Security**: bearer token authentication issued by `POST /api/auth/login`
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Category, ComplaintStatus, Error, ErrorCode, Role, StatusEntry};
use crate::inbound::http::admin_users::CreateStudentRequest;
use crate::inbound::http::complaints::{CreateComplaintRequest, UpdateStatusRequest};
use crate::inbound::http::dto::{
    AdminComplaintResponse, ComplaintOwnerResponse, ComplaintResponse, DeletedStudentResponse,
    LoginResponse, UserResponse,
};
use crate::inbound::http::health::RootResponse;
use crate::inbound::http::login::LoginRequest;

/// Name of the bearer security scheme in the generated document.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /api/auth/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Campus complaints API",
        description = "Students file complaints; administrators manage accounts and move complaints through their lifecycle."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::login::login,
        crate::inbound::http::complaints::create_complaint,
        crate::inbound::http::complaints::list_my_complaints,
        crate::inbound::http::complaints::list_complaints,
        crate::inbound::http::complaints::update_complaint_status,
        crate::inbound::http::admin_users::create_student,
        crate::inbound::http::admin_users::list_students,
        crate::inbound::http::admin_users::toggle_student,
        crate::inbound::http::admin_users::delete_student,
        crate::inbound::http::health::root,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Role,
        Category,
        ComplaintStatus,
        StatusEntry,
        LoginRequest,
        LoginResponse,
        UserResponse,
        CreateStudentRequest,
        DeletedStudentResponse,
        CreateComplaintRequest,
        UpdateStatusRequest,
        ComplaintResponse,
        ComplaintOwnerResponse,
        AdminComplaintResponse,
        RootResponse,
    )),
    tags(
        (name = "auth", description = "Token issuance"),
        (name = "complaints", description = "Complaint filing and lifecycle"),
        (name = "admin", description = "Administrator management of student accounts"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
