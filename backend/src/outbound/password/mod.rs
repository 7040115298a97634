//! Argon2id implementation of the password hashing port.
//!
//! Hashes are stored in PHC string format so parameters travel with each
//! hash; raising the cost later does not invalidate existing accounts.
//! Hashing is CPU-bound and runs on Tokio's blocking pool.

use argon2::password_hash::{
    Error as PhcError, PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _,
    SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use rand::rngs::OsRng;
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Cost parameters for Argon2id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Settings {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes.
    pub iterations: u32,
    /// Degree of parallelism.
    pub parallelism: u32,
}

impl Default for Argon2Settings {
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// Salted Argon2id hasher.
#[derive(Debug, Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    /// Validate `settings` and build a hasher.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError::Configuration`] when Argon2 rejects the
    /// parameters.
    pub fn new(settings: Argon2Settings) -> Result<Self, PasswordHashError> {
        let params = Params::new(
            settings.memory_kib,
            settings.iterations,
            settings.parallelism,
            None,
        )
        .map_err(|err| PasswordHashError::configuration(err.to_string()))?;
        Ok(Self { params })
    }

    fn engine(params: Params) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHashError> {
        let params = self.params.clone();
        let secret = Zeroizing::new(plaintext.to_owned());

        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Self::engine(params)
                .hash_password(secret.as_bytes(), &salt)
                .map(|phc| PasswordHash::new(phc.to_string()))
                .map_err(|err| PasswordHashError::hashing(err.to_string()))
        })
        .await
        .map_err(|err| PasswordHashError::hashing(err.to_string()))?
    }

    async fn verify(&self, plaintext: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        let params = self.params.clone();
        let secret = Zeroizing::new(plaintext.to_owned());
        let encoded = hash.as_str().to_owned();

        tokio::task::spawn_blocking(move || {
            let parsed = match PhcHash::new(&encoded) {
                Ok(parsed) => parsed,
                Err(err) => {
                    warn!(error = %err, "stored password hash is malformed");
                    return Ok(false);
                }
            };
            match Self::engine(params).verify_password(secret.as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(PhcError::Password) => Ok(false),
                Err(err) => Err(PasswordHashError::hashing(err.to_string())),
            }
        })
        .await
        .map_err(|err| PasswordHashError::hashing(err.to_string()))?
    }
}
