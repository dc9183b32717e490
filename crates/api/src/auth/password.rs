//! Peppered Argon2id password hashing and verification.
//!
//! The server-wide pepper is prepended to the plaintext before hashing. Each
//! hash gets a cryptographically random salt generated via [`OsRng`] and is
//! stored as a PHC string, so the algorithm parameters and salt travel with
//! the hash and verification always uses the parameters it was created with.

use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHasher as _, PasswordVerifier as _, Version};
use warden_core::error::CoreError;

use crate::config::{AuthConfig, Environment};

/// Work factor applied when hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashCost {
    /// 19 MiB of memory and 14 passes.
    Production,
    /// Minimum memory and a single pass, to keep tests fast.
    Development,
}

impl HashCost {
    /// Memory cost of the production profile, in KiB.
    const PRODUCTION_M_COST: u32 = 19 * 1024;
    /// Pass count of the production profile.
    const PRODUCTION_T_COST: u32 = 14;

    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Production => Self::Production,
            Environment::Development => Self::Development,
        }
    }

    fn params(self) -> Params {
        let params = match self {
            Self::Production => {
                Params::new(Self::PRODUCTION_M_COST, Self::PRODUCTION_T_COST, 1, None)
            }
            Self::Development => Params::new(Params::MIN_M_COST, Params::MIN_T_COST, 1, None),
        };
        params.unwrap_or_default()
    }
}

/// One-way credential transform configured once at startup.
pub struct PepperedHasher {
    pepper: String,
    argon2: Argon2<'static>,
}

impl PepperedHasher {
    pub fn new(pepper: impl Into<String>, cost: HashCost) -> Self {
        Self {
            pepper: pepper.into(),
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, cost.params()),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            config.pepper.clone(),
            HashCost::for_environment(config.environment),
        )
    }

    fn peppered(&self, plaintext: &str) -> String {
        format!("{}{plaintext}", self.pepper)
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// Returns the PHC-formatted hash string. Two calls with the same input
    /// produce different strings.
    pub fn hash(&self, plaintext: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(self.peppered(plaintext).as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    /// Check a candidate plaintext against a stored hash.
    ///
    /// Never fails: a mismatch, or a stored value that is not a valid PHC
    /// string, is simply `false`.
    pub fn verify(&self, candidate: &str, stored_hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored_hash) else {
            tracing::warn!("Stored password hash is not a valid PHC string");
            return false;
        };
        self.argon2
            .verify_password(self.peppered(candidate).as_bytes(), &parsed)
            .is_ok()
    }
}

/// Hash on the blocking pool so CPU-bound work does not stall the async runtime.
///
/// Runs to completion once started; there is no cancellation.
pub async fn hash_blocking(
    hasher: Arc<PepperedHasher>,
    plaintext: String,
) -> Result<String, CoreError> {
    tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
        .await
        .map_err(|e| CoreError::Internal(format!("Password hashing task failed: {e}")))?
        .map_err(|e| CoreError::Internal(format!("Password hashing error: {e}")))
}

/// Verify on the blocking pool. See [`PepperedHasher::verify`].
pub async fn verify_blocking(
    hasher: Arc<PepperedHasher>,
    candidate: String,
    stored_hash: String,
) -> Result<bool, CoreError> {
    tokio::task::spawn_blocking(move || hasher.verify(&candidate, &stored_hash))
        .await
        .map_err(|e| CoreError::Internal(format!("Password verification task failed: {e}")))
}
