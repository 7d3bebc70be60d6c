//! HTTP inbound adapter exposing the REST endpoints under `/api`.

pub mod admin_users;
pub mod auth;
pub mod cache_control;
pub mod complaints;
pub mod dto;
pub mod error;
pub mod health;
pub mod login;
pub mod routes;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
