//! Authentication primitives: login credentials, new-account passwords and the
//! identity carried by bearer tokens.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::user::{Role, User, UserId, UserValidationError};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Identifier was missing or blank once trimmed.
    #[error("identifier must not be empty")]
    EmptyIdentifier,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials used by the login service.
///
/// ## Invariants
/// - `identifier` is trimmed and must not be empty after trimming.
/// - `password` must be non-empty but retains caller-provided whitespace.
///
/// # Examples
/// ```
/// use complaints::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Admin@Campus.edu ", "password").unwrap();
/// assert_eq!(creds.identifier(), "Admin@Campus.edu");
/// assert_eq!(creds.email_candidate(), "admin@campus.edu");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    identifier: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw identifier/password inputs.
    ///
    /// # Errors
    /// Rejects a blank identifier or an empty password.
    pub fn try_from_parts(identifier: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = identifier.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyIdentifier);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            identifier: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Trimmed identifier, matched verbatim against student identifiers.
    #[must_use]
    pub fn identifier(&self) -> &str {
        self.identifier.as_str()
    }

    /// Lower-cased identifier, matched against stored emails.
    #[must_use]
    pub fn email_candidate(&self) -> String {
        self.identifier.to_lowercase()
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Minimum length accepted for a new account password.
pub const PASSWORD_MIN: usize = 6;

/// Plain-text password chosen for a new account; wiped from memory on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct NewPassword(Zeroizing<String>);

impl NewPassword {
    /// Validate a password for a new account.
    ///
    /// # Errors
    /// Returns [`UserValidationError::MissingField`] for empty input and
    /// [`UserValidationError::PasswordTooShort`] below [`PASSWORD_MIN`].
    pub fn new(value: &str) -> Result<Self, UserValidationError> {
        if value.is_empty() {
            return Err(UserValidationError::MissingField { field: "password" });
        }
        if value.chars().count() < PASSWORD_MIN {
            return Err(UserValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(Self(Zeroizing::new(value.to_owned())))
    }

    /// Expose the secret for hashing.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for NewPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NewPassword(<redacted>)")
    }
}

/// Identity embedded in a bearer token and attached to authenticated requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
    pub name: String,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            role: user.role,
            name: user.name.to_string(),
        }
    }
}

/// Result of a successful login: a signed bearer token and the account.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyIdentifier)]
    #[case("   ", "pw", LoginValidationError::EmptyIdentifier)]
    #[case("stu01", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] identifier: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(identifier, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  stu01  ", "secret1")]
    #[case("admin@campus.edu", " spaced password ")]
    fn valid_credentials_trim_identifier(#[case] identifier: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(identifier, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.identifier(), identifier.trim());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    #[case("", UserValidationError::MissingField { field: "password" })]
    #[case("12345", UserValidationError::PasswordTooShort { min: 6 })]
    fn new_password_rejects_weak_values(
        #[case] raw: &str,
        #[case] expected: UserValidationError,
    ) {
        assert_eq!(NewPassword::new(raw).expect_err("weak password"), expected);
    }

    #[rstest]
    fn new_password_debug_is_redacted() {
        let password = NewPassword::new("secret1").expect("valid password");
        assert_eq!(password.expose(), "secret1");
        assert!(!format!("{password:?}").contains("secret1"));
    }
}
