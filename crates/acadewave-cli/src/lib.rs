//! # Acadewave CLI
//!
//! Account provisioning used by the `acadewave-cli` binary.
//!
//! Self-registration over HTTP only creates students, so admin and teacher
//! accounts are created here, directly against the account directory.
//!
//! ## Usage
//!
//! ```ignore
//! use acadewave_cli::{AccountSpec, create_account};
//!
//! let spec = AccountSpec::new("ada@example.com", "ada", "correct horse", Role::Admin);
//! let account = create_account(&directory, &hasher, spec, Utc::now()).await?;
//! ```

use acadewave_core::{PasswordError, PasswordHasher};
use acadewave_db::{AccountDirectory, DirectoryError};
use acadewave_models::{Account, NewAccount, RegisterRequest, Role};
use chrono::{DateTime, Utc};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("invalid account details: {0}")]
    Invalid(#[from] ValidationErrors),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Details for a provisioned account.
#[derive(Debug, Clone)]
pub struct AccountSpec {
    pub email: String,
    pub username: String,
    pub password: String,
    pub role: Role,
    /// Skip email verification and create the account active.
    pub activate: bool,
}

impl AccountSpec {
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            password: password.into(),
            role,
            activate: true,
        }
    }
}

/// Creates an account with any role, applying the same field rules as
/// self-registration.
pub async fn create_account(
    directory: &dyn AccountDirectory,
    hasher: &dyn PasswordHasher,
    spec: AccountSpec,
    now: DateTime<Utc>,
) -> Result<Account, ProvisionError> {
    RegisterRequest {
        email: spec.email.clone(),
        username: spec.username.clone(),
        password: spec.password.clone(),
    }
    .validate()?;

    let password_hash = hasher.hash(&spec.password)?;
    let account = directory
        .create(NewAccount {
            email: spec.email,
            username: spec.username,
            password_hash,
            role: spec.role,
            created_at: now,
        })
        .await?;

    if spec.activate {
        return Ok(directory.activate(account.id).await?);
    }

    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use acadewave_core::BcryptHasher;
    use acadewave_db::{DuplicateField, MemoryAccountDirectory};

    fn hasher() -> BcryptHasher {
        BcryptHasher::new(4)
    }

    #[tokio::test]
    async fn test_create_active_admin() {
        let directory = MemoryAccountDirectory::new();
        let spec = AccountSpec::new("admin@example.com", "admin", "password123", Role::Admin);

        let account = create_account(&directory, &hasher(), spec, Utc::now())
            .await
            .unwrap();

        assert_eq!(account.role, Role::Admin);
        assert!(account.is_active);
        assert!(hasher().verify("password123", &account.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_create_inactive_teacher() {
        let directory = MemoryAccountDirectory::new();
        let mut spec = AccountSpec::new("t@example.com", "teacher1", "password123", Role::Teacher);
        spec.activate = false;

        let account = create_account(&directory, &hasher(), spec, Utc::now())
            .await
            .unwrap();

        assert_eq!(account.role, Role::Teacher);
        assert!(!account.is_active);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let directory = MemoryAccountDirectory::new();
        let first = AccountSpec::new("dup@example.com", "first", "password123", Role::Admin);
        let second = AccountSpec::new("dup@example.com", "second", "password123", Role::Teacher);

        create_account(&directory, &hasher(), first, Utc::now())
            .await
            .unwrap();
        let err = create_account(&directory, &hasher(), second, Utc::now())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ProvisionError::Directory(DirectoryError::Duplicate(DuplicateField::Email))
        ));
        assert_eq!(directory.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_details_never_reach_directory() {
        let directory = MemoryAccountDirectory::new();
        let spec = AccountSpec::new("not-an-email", "has@sign", "short", Role::Admin);

        let err = create_account(&directory, &hasher(), spec, Utc::now())
            .await
            .unwrap_err();

        assert!(matches!(err, ProvisionError::Invalid(_)));
        assert!(directory.is_empty());
    }
}
