//! Route table for the REST API.
//!
//! The server and the integration tests mount the same table, so both see
//! identical paths, guards and body handling.

use actix_web::web;

use super::admin_users::{create_student, delete_student, list_students, toggle_student};
use super::complaints::{
    create_complaint, list_complaints, list_my_complaints, update_complaint_status,
};
use super::login::login;
use super::validation::json_error_handler;

/// JSON extractor configuration mapping body errors to `invalid_request`.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

/// Register every `/api` endpoint on `cfg`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use complaints::inbound::http::routes::configure_api;
///
/// let _app = App::new().service(web::scope("/api").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(login)
        .service(list_my_complaints)
        .service(create_complaint)
        .service(list_complaints)
        .service(update_complaint_status)
        .service(create_student)
        .service(list_students)
        .service(toggle_student)
        .service(delete_student);
}
