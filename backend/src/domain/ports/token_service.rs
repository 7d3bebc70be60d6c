//! Port for issuing and verifying bearer tokens.

use crate::domain::Identity;

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenError {
        /// Signature, structure or claims were rejected.
        Invalid { message: String } => "invalid token: {message}",
        /// The token's expiry has passed.
        Expired => "token expired",
        /// A token could not be signed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Signs and verifies time-bound bearer tokens carrying an [`Identity`].
///
/// Verification is local; no store is consulted.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Issue a signed token for `identity`.
    fn issue(&self, identity: &Identity) -> Result<String, TokenError>;

    /// Verify signature and expiry, returning the embedded identity.
    fn verify(&self, token: &str) -> Result<Identity, TokenError>;
}
