//! Port for one-way password hashing.

use async_trait::async_trait;

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// The work factor configuration was rejected.
        Configuration { message: String } => "password hasher misconfigured: {message}",
        /// Hashing or verification could not run.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Salted, slow password hashing.
///
/// Implementations must never log or retain the plaintext.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash `plaintext` with a fresh random salt.
    async fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Check `plaintext` against a stored hash. A malformed hash verifies as
    /// `false`.
    async fn verify(&self, plaintext: &str, hash: &PasswordHash)
    -> Result<bool, PasswordHashError>;
}
