//! Bearer-token authorization gate.
//!
//! [`StudentAuth`] and [`AdminAuth`] are Actix extractors: they read
//! `Authorization: Bearer <token>`, verify the token through the
//! [`TokenService`] port held in [`HttpState`] and enforce the caller's role,
//! so a handler that takes one never runs for the wrong audience.
//!
//! Extractors run in argument order; place the gate first so 401/403 win over
//! body validation errors.
//!
//! [`TokenService`]: crate::domain::ports::TokenService

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpMessage, HttpRequest, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::ports::TokenError;
use crate::domain::{Error, Identity, Role};

use super::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

fn missing_token() -> Error {
    Error::unauthorized("Missing token")
}

fn invalid_token() -> Error {
    Error::unauthorized("Invalid token")
}

/// Extract the raw token from an `Authorization: Bearer <token>` header.
///
/// # Errors
/// Returns `unauthorized` ("Missing token") when the header is absent, not
/// UTF-8, lacks the `Bearer ` prefix or carries an empty token.
pub(crate) fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(missing_token)
}

fn authenticate(req: &HttpRequest) -> Result<Identity, Error> {
    if let Some(identity) = req.extensions().get::<Identity>() {
        return Ok(identity.clone());
    }

    let token = bearer_token(req)?;
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    let identity = state.tokens.verify(token).map_err(|err| {
        match &err {
            TokenError::Expired => debug!("rejected expired bearer token"),
            other => debug!(error = %other, "rejected bearer token"),
        }
        invalid_token()
    })?;
    req.extensions_mut().insert(identity.clone());
    Ok(identity)
}

/// Role check over an optional identity: `unauthorized` when absent,
/// `forbidden` on mismatch.
pub(crate) fn require_role(identity: Option<&Identity>, expected: Role) -> Result<&Identity, Error> {
    let identity = identity.ok_or_else(|| Error::unauthorized("Unauthorized"))?;
    if identity.role == expected {
        Ok(identity)
    } else {
        Err(Error::forbidden("Forbidden"))
    }
}

macro_rules! role_gate {
    ($(#[$meta:meta])* $name:ident => $role:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name(Identity);

        impl $name {
            /// Identity of the authorised caller.
            #[must_use]
            pub fn identity(&self) -> &Identity {
                &self.0
            }
        }

        impl FromRequest for $name {
            type Error = Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                ready(authenticate(req).and_then(|identity| {
                    require_role(Some(&identity), $role)?;
                    Ok(Self(identity))
                }))
            }
        }
    };
}

role_gate! {
    /// Authenticated caller holding the `student` role.
    StudentAuth => Role::Student
}

role_gate! {
    /// Authenticated caller holding the `admin` role.
    AdminAuth => Role::Admin
}
