//! Handler tests for the complaint endpoints.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use rstest::rstest;
use serde_json::{Value, json};

use crate::domain::ports::{MockComplaintsCommand, MockComplaintsQuery};
use crate::domain::test_fixtures::{complaint_for, student};
use crate::domain::{
    Category, ComplaintStatus, ComplaintView, Error, Identity, OwnerSummary, Role,
};
use crate::inbound::http::test_utils::{
    HttpStateBuilder, authorised, call_api, identity_with, tokens_for,
};

fn student_identity() -> Identity {
    identity_with(Role::Student)
}

#[rstest]
#[actix_web::test]
async fn student_files_a_pending_complaint() {
    let identity = student_identity();
    let owner = identity.user_id;
    let mut command = MockComplaintsCommand::new();
    command
        .expect_file_complaint()
        .withf(move |caller, draft| {
            caller.user_id == owner && draft.category == Category::It && draft.title == "Wifi down"
        })
        .return_once(move |_, _| Ok(complaint_for(owner)));
    let state = HttpStateBuilder::new()
        .with_tokens(tokens_for(identity))
        .with_complaints(Arc::new(command))
        .build();

    let request = authorised(TestRequest::post().uri("/api/complaints")).set_json(json!({
        "category": "IT",
        "title": " Wifi down ",
        "description": "Lab 3 offline",
    }));
    let (status, body) = call_api(state, request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], json!("Pending"));
    assert_eq!(body["ownerId"], json!(owner.to_string()));
    assert_eq!(body["statusHistory"].as_array().map(Vec::len), Some(1));
}

#[rstest]
#[case(json!({"title": "t", "description": "d"}), "category")]
#[case(json!({"category": "Parking", "title": "t", "description": "d"}), "category")]
#[case(json!({"category": "IT", "title": "   ", "description": "d"}), "title")]
#[case(json!({"category": "IT", "title": "t", "description": ""}), "description")]
#[actix_web::test]
async fn invalid_complaints_are_rejected(#[case] payload: Value, #[case] field: &str) {
    let mut command = MockComplaintsCommand::new();
    command.expect_file_complaint().never();
    let state = HttpStateBuilder::new()
        .with_tokens(tokens_for(student_identity()))
        .with_complaints(Arc::new(command))
        .build();

    let request = authorised(TestRequest::post().uri("/api/complaints")).set_json(payload);
    let (status, body) = call_api(state, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], json!(field));
}

#[rstest]
#[actix_web::test]
async fn admins_cannot_file_complaints() {
    let mut command = MockComplaintsCommand::new();
    command.expect_file_complaint().never();
    let state = HttpStateBuilder::new()
        .with_tokens(tokens_for(identity_with(Role::Admin)))
        .with_complaints(Arc::new(command))
        .build();

    let request = authorised(TestRequest::post().uri("/api/complaints"))
        .set_json(json!({"category": "IT", "title": "t", "description": "d"}));
    let (status, body) = call_api(state, request).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], json!("forbidden"));
}

#[rstest]
#[actix_web::test]
async fn gate_runs_before_body_validation() {
    let state = HttpStateBuilder::new().build();
    let request = TestRequest::post()
        .uri("/api/complaints")
        .set_json(json!({"unexpected": true}));

    let (status, body) = call_api(state, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], json!("Missing token"));
}

#[rstest]
#[actix_web::test]
async fn mine_lists_only_the_callers_complaints() {
    let identity = student_identity();
    let owner = identity.user_id;
    let mut query = MockComplaintsQuery::new();
    query
        .expect_list_mine()
        .withf(move |id| *id == owner)
        .return_once(move |_| Ok(vec![complaint_for(owner), complaint_for(owner)]));
    let state = HttpStateBuilder::new()
        .with_tokens(tokens_for(identity))
        .with_complaints_query(Arc::new(query))
        .build();

    let (status, body) =
        call_api(state, authorised(TestRequest::get().uri("/api/complaints/mine"))).await;

    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().expect("array body");
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| item["ownerId"] == json!(owner.to_string())));
}

#[rstest]
#[actix_web::test]
async fn admin_list_includes_student_details() {
    let owner = student("stu01", true);
    let view = ComplaintView {
        complaint: complaint_for(owner.id),
        owner: Some(OwnerSummary::from(&owner)),
    };
    let mut query = MockComplaintsQuery::new();
    query.expect_list_all().return_once(move || Ok(vec![view]));
    let state = HttpStateBuilder::new()
        .with_tokens(tokens_for(identity_with(Role::Admin)))
        .with_complaints_query(Arc::new(query))
        .build();

    let (status, body) =
        call_api(state, authorised(TestRequest::get().uri("/api/complaints"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["student"]["name"], json!("Ada Lovelace"));
}

#[rstest]
#[actix_web::test]
async fn students_cannot_list_all_complaints() {
    let state = HttpStateBuilder::new()
        .with_tokens(tokens_for(student_identity()))
        .build();

    let (status, _) =
        call_api(state, authorised(TestRequest::get().uri("/api/complaints"))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[rstest]
#[actix_web::test]
async fn admin_updates_status_with_note() {
    let owner = student("stu01", true);
    let mut complaint = complaint_for(owner.id);
    let id = complaint.id;
    let mut command = MockComplaintsCommand::new();
    command
        .expect_update_status()
        .withf(move |target, update| {
            *target == id
                && update.status == ComplaintStatus::InProgress
                && update.admin_note == "Technician assigned"
        })
        .return_once(move |_, update| {
            complaint.apply(update, complaint.created_at);
            Ok(ComplaintView {
                complaint,
                owner: Some(OwnerSummary::from(&owner)),
            })
        });
    let state = HttpStateBuilder::new()
        .with_tokens(tokens_for(identity_with(Role::Admin)))
        .with_complaints(Arc::new(command))
        .build();

    let request = authorised(TestRequest::put().uri(&format!("/api/complaints/{id}/status")))
        .set_json(json!({"status": "In Progress", "adminNote": "Technician assigned"}));
    let (status, body) = call_api(state, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("In Progress"));
    assert_eq!(body["statusHistory"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["adminNote"], json!("Technician assigned"));
}

#[rstest]
#[case("not-a-uuid", json!({"status": "Resolved"}), StatusCode::BAD_REQUEST)]
#[case("3fa85f64-5717-4562-b3fc-2c963f66afa6", json!({"status": "Closed"}), StatusCode::BAD_REQUEST)]
#[case("3fa85f64-5717-4562-b3fc-2c963f66afa6", json!({"adminNote": "x"}), StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn invalid_status_updates_are_rejected(
    #[case] id: &str,
    #[case] payload: Value,
    #[case] expected: StatusCode,
) {
    let mut command = MockComplaintsCommand::new();
    command.expect_update_status().never();
    let state = HttpStateBuilder::new()
        .with_tokens(tokens_for(identity_with(Role::Admin)))
        .with_complaints(Arc::new(command))
        .build();

    let request = authorised(TestRequest::put().uri(&format!("/api/complaints/{id}/status")))
        .set_json(payload);
    let (status, body) = call_api(state, request).await;

    assert_eq!(status, expected);
    assert_eq!(body["code"], json!("invalid_request"));
}

#[rstest]
#[actix_web::test]
async fn updating_a_missing_complaint_is_not_found() {
    let mut command = MockComplaintsCommand::new();
    command
        .expect_update_status()
        .return_once(|_, _| Err(Error::not_found("Complaint not found")));
    let state = HttpStateBuilder::new()
        .with_tokens(tokens_for(identity_with(Role::Admin)))
        .with_complaints(Arc::new(command))
        .build();

    let request = authorised(
        TestRequest::put().uri("/api/complaints/3fa85f64-5717-4562-b3fc-2c963f66afa6/status"),
    )
    .set_json(json!({"status": "Resolved"}));
    let (status, _) = call_api(state, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
