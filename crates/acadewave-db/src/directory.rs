use std::fmt;

use acadewave_models::{Account, AccountId, NewAccount};
use async_trait::async_trait;
use thiserror::Error;

/// Which unique field a conflicting registration collided on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateField {
    Email,
    Username,
}

impl fmt::Display for DuplicateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicateField::Email => f.write_str("email"),
            DuplicateField::Username => f.write_str("username"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("an account with this {0} already exists")]
    Duplicate(DuplicateField),

    #[error("account is already verified")]
    AlreadyVerified,

    #[error("account not found")]
    NotFound,

    #[error("directory backend failure: {0}")]
    Backend(#[from] sqlx::Error),
}

/// Lookup and mutation of stored accounts.
///
/// Identities are matched exactly against either the email or the username.
/// Implementations must check email and username uniqueness atomically in
/// [`create`](AccountDirectory::create) so that concurrent registrations
/// cannot both succeed.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, DirectoryError>;

    async fn find_by_identity(&self, identity: &str) -> Result<Option<Account>, DirectoryError>;

    /// Stores a new, inactive account.
    async fn create(&self, new_account: NewAccount) -> Result<Account, DirectoryError>;

    /// Flips an inactive account to active. Fails with
    /// [`DirectoryError::AlreadyVerified`] if it is already active.
    async fn activate(&self, id: AccountId) -> Result<Account, DirectoryError>;

    async fn update_password_hash(
        &self,
        id: AccountId,
        password_hash: &str,
    ) -> Result<(), DirectoryError>;

    /// Renames an account. Fails with
    /// [`DirectoryError::Duplicate`] if another account holds `username`.
    async fn update_username(
        &self,
        id: AccountId,
        username: &str,
    ) -> Result<Account, DirectoryError>;
}
