//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to exchange credentials for a bearer token without
//! knowing the backing infrastructure, so handler tests can substitute a
//! double instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, LoginOutcome};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and issue a token for the matching account.
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error>;
}
