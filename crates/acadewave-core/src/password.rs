//! Password hashing.
//!
//! The account lifecycle treats hashing as an opaque capability behind
//! [`PasswordHasher`]. The production implementation is bcrypt.

use bcrypt::{DEFAULT_COST, hash, verify};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hash(#[source] bcrypt::BcryptError),

    #[error("failed to verify password: {0}")]
    Verify(#[source] bcrypt::BcryptError),
}

/// Hashes and checks passwords. Implementations must be safe to share
/// between request handlers.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    /// Returns `Ok(false)` for a wrong password and `Err` only when `hash`
    /// itself is unusable.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError>;
}

/// bcrypt with a configurable work factor.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// bcrypt accepts costs between 4 and 31.
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        hash(password, self.cost).map_err(PasswordError::Hash)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        verify(password, hash).map_err(PasswordError::Verify)
    }
}

/// Hashes with the default bcrypt cost.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    BcryptHasher::default().hash(password)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    BcryptHasher::default().verify(password, hash)
}
