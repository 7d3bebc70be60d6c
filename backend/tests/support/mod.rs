//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, which
//! makes it awkward to share small helpers without copy/paste. This module
//! assembles the full `/api` application over the in-memory store, seeds an
//! administrator and offers thin request helpers.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::http::{Method, StatusCode};
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use mockable::{Clock, DefaultClock};
use serde_json::{Value, json};
use zeroize::Zeroizing;

use complaints::Trace;
use complaints::domain::ports::{PasswordHasher, TokenService};
use complaints::domain::{
    ComplaintService, NewAdmin, NewPassword, PasswordLoginService, StudentAccountsService,
    TRACE_ID_HEADER,
};
use complaints::inbound::http::routes::configure_api;
use complaints::inbound::http::state::{HttpState, HttpStatePorts};
use complaints::outbound::memory::{InMemoryComplaintRepository, InMemoryUserRepository};
use complaints::outbound::security::{Argon2PasswordHasher, JwtTokenService};

pub const ADMIN_EMAIL: &str = "admin@campus.edu";
pub const ADMIN_PASSWORD: &str = "admin-secret";
pub const STUDENT_PASSWORD: &str = "secret1";

const JWT_SECRET: &[u8] = b"integration-secret-0123456789abcdef";

/// Response captured from the application.
#[derive(Debug)]
pub struct Captured {
    pub status: StatusCode,
    pub trace_id: Option<String>,
    pub body: Value,
}

/// Build the `/api` application over fresh in-memory repositories with one
/// administrator account already present.
pub async fn spawn_api()
-> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    let users = Arc::new(InMemoryUserRepository::new());
    let complaints = Arc::new(InMemoryComplaintRepository::new());
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(
        Zeroizing::new(JWT_SECRET.to_vec()),
        clock.clone(),
    ));

    let students = Arc::new(StudentAccountsService::new(
        users.clone(),
        hasher.clone(),
        clock.clone(),
    ));
    students
        .create_admin(
            NewAdmin::try_from_parts(ADMIN_EMAIL, "Grace Hopper").expect("valid admin"),
            NewPassword::new(ADMIN_PASSWORD).expect("valid password"),
        )
        .await
        .expect("seed administrator");

    let complaint_service = Arc::new(ComplaintService::new(complaints, users.clone(), clock));
    let state = HttpState::new(HttpStatePorts {
        login: Arc::new(PasswordLoginService::new(users, hasher, tokens.clone())),
        tokens,
        students: students.clone(),
        students_query: students,
        complaints: complaint_service.clone(),
        complaints_query: complaint_service,
    });

    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .service(web::scope("/api").configure(configure_api)),
    )
    .await
}

/// Send a request and capture status, trace header and JSON body.
///
/// The body is `Null` when the response has no JSON payload.
pub async fn send<S, B>(
    app: &S,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Captured
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let mut request = TestRequest::default().method(method).uri(path);
    if let Some(token) = token {
        request = request.insert_header((AUTHORIZATION, format!("Bearer {token}")));
    }
    if let Some(body) = body {
        request = request.set_json(body);
    }
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = test::read_body(response).await;
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Captured {
        status,
        trace_id,
        body,
    }
}

/// Attempt a login and return the raw response.
pub async fn login<S, B>(app: &S, identifier: &str, password: &str) -> Captured
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"identifier": identifier, "password": password})),
    )
    .await
}

/// Log in and return the bearer token, failing the test otherwise.
pub async fn token_for<S, B>(app: &S, identifier: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = login(app, identifier, password).await;
    assert_eq!(response.status, StatusCode::OK, "login failed: {:?}", response.body);
    response.body["token"]
        .as_str()
        .expect("token in login response")
        .to_owned()
}

/// Registration payload for a student with the shared test password.
pub fn student_payload(student_id: &str, name: &str) -> Value {
    json!({
        "studentId": student_id,
        "name": name,
        "department": "CS",
        "classLevel": "2A",
        "password": STUDENT_PASSWORD,
    })
}

/// Register a student as `admin_token` and return the created user body.
pub async fn create_student<S, B>(app: &S, admin_token: &str, student_id: &str, name: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = send(
        app,
        Method::POST,
        "/api/admin/users",
        Some(admin_token),
        Some(student_payload(student_id, name)),
    )
    .await;
    assert_eq!(
        response.status,
        StatusCode::CREATED,
        "create student failed: {:?}",
        response.body
    );
    response.body
}
