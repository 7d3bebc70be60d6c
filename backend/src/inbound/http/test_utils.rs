//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::Value;

use crate::domain::ports::{
    ComplaintsCommand, ComplaintsQuery, LoginService, MockComplaintsCommand, MockComplaintsQuery,
    MockLoginService, MockStudentAccountsCommand, MockStudentAccountsQuery, MockTokenService,
    StudentAccountsCommand, StudentAccountsQuery, TokenService,
};
use crate::domain::{Identity, Role, UserId};

use super::routes::configure_api;
use super::state::{HttpState, HttpStatePorts};

/// Token accepted by [`tokens_for`].
pub const TEST_TOKEN: &str = "test-token";

/// Builds [`HttpState`] from mocks; every port defaults to a mock with no
/// expectations, so unexpected calls fail the test.
pub struct HttpStateBuilder {
    ports: HttpStatePorts,
}

impl HttpStateBuilder {
    pub fn new() -> Self {
        Self {
            ports: HttpStatePorts {
                login: Arc::new(MockLoginService::new()),
                tokens: Arc::new(MockTokenService::new()),
                students: Arc::new(MockStudentAccountsCommand::new()),
                students_query: Arc::new(MockStudentAccountsQuery::new()),
                complaints: Arc::new(MockComplaintsCommand::new()),
                complaints_query: Arc::new(MockComplaintsQuery::new()),
            },
        }
    }

    pub fn with_login(mut self, login: Arc<dyn LoginService>) -> Self {
        self.ports.login = login;
        self
    }

    pub fn with_tokens(mut self, tokens: Arc<dyn TokenService>) -> Self {
        self.ports.tokens = tokens;
        self
    }

    pub fn with_students(mut self, students: Arc<dyn StudentAccountsCommand>) -> Self {
        self.ports.students = students;
        self
    }

    pub fn with_students_query(mut self, query: Arc<dyn StudentAccountsQuery>) -> Self {
        self.ports.students_query = query;
        self
    }

    pub fn with_complaints(mut self, complaints: Arc<dyn ComplaintsCommand>) -> Self {
        self.ports.complaints = complaints;
        self
    }

    pub fn with_complaints_query(mut self, query: Arc<dyn ComplaintsQuery>) -> Self {
        self.ports.complaints_query = query;
        self
    }

    pub fn build(self) -> HttpState {
        HttpState::new(self.ports)
    }
}

/// Identity with a fresh id and the given role.
pub fn identity_with(role: Role) -> Identity {
    Identity {
        user_id: UserId::random(),
        role,
        name: "Ada Lovelace".to_owned(),
    }
}

/// Token service mock accepting [`TEST_TOKEN`] as `identity`.
pub fn tokens_for(identity: Identity) -> Arc<dyn TokenService> {
    let mut tokens = MockTokenService::new();
    tokens
        .expect_verify()
        .withf(|token| token == TEST_TOKEN)
        .returning(move |_| Ok(identity.clone()));
    Arc::new(tokens)
}

/// Attach `Authorization: Bearer` [`TEST_TOKEN`] to a request.
pub fn authorised(request: TestRequest) -> TestRequest {
    request.insert_header((AUTHORIZATION, format!("Bearer {TEST_TOKEN}")))
}

/// Send `request` through the full `/api` route table backed by `state`.
///
/// Returns the status and the JSON body (`Null` when the body is empty).
pub async fn call_api(state: HttpState, request: TestRequest) -> (StatusCode, Value) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(web::scope("/api").configure(configure_api)),
    )
    .await;
    let response = test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = test::read_body(response).await;
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}
