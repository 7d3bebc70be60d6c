//! Password login: credential lookup, verification and token issuance.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{LoginService, PasswordHasher, TokenService, UserRepository};
use crate::domain::port_error_mapping::{
    map_password_hash_error, map_token_issue_error, map_user_persistence_error,
};
use crate::domain::{Error, Identity, LoginCredentials, LoginOutcome};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Login service backed by the account store.
///
/// The password is checked before the active flag so a wrong password never
/// reveals whether an account is disabled.
#[derive(Clone)]
pub struct PasswordLoginService<U> {
    users: Arc<U>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

impl<U> PasswordLoginService<U> {
    /// Create a new service over the given collaborators.
    pub fn new(users: Arc<U>, hasher: Arc<dyn PasswordHasher>, tokens: Arc<dyn TokenService>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

#[async_trait]
impl<U> LoginService for PasswordLoginService<U>
where
    U: UserRepository,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error> {
        let Some(user) = self
            .users
            .find_by_login(credentials.identifier(), &credentials.email_candidate())
            .await
            .map_err(map_user_persistence_error)?
        else {
            debug!("login rejected: unknown identifier");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let verified = self
            .hasher
            .verify(credentials.password(), &user.password_hash)
            .map_err(map_password_hash_error)?;
        if !verified {
            debug!(user_id = %user.id, "login rejected: password mismatch");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        if !user.is_active {
            debug!(user_id = %user.id, "login rejected: account disabled");
            return Err(Error::account_disabled("Account disabled"));
        }

        let token = self
            .tokens
            .issue(&Identity::from(&user))
            .map_err(map_token_issue_error)?;
        info!(user_id = %user.id, role = %user.role, "login succeeded");
        Ok(LoginOutcome { token, user })
    }
}
