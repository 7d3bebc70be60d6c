//! Port for one-way password hashing.

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Hashing failed, usually from invalid parameters.
        Hash { message: String } => "password hashing failed: {message}",
        /// A stored hash could not be decoded.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Salted one-way hash with a constant-time verification.
///
/// Hashing is CPU bound and runs inline on the calling task.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plain-text password with a fresh salt.
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Check a plain-text password against a stored hash.
    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError>;
}
