use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use acadewave_models::{Account, AccountId, NewAccount};
use async_trait::async_trait;

use crate::directory::{AccountDirectory, DirectoryError, DuplicateField};

/// In-memory account directory.
///
/// Intended for tests and local runs. Every mutation happens under a single
/// write lock, so the uniqueness check and the insert are one step.
#[derive(Debug, Default)]
pub struct MemoryAccountDirectory {
    accounts: RwLock<HashMap<AccountId, Account>>,
}

impl MemoryAccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AccountDirectory for MemoryAccountDirectory {
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, DirectoryError> {
        let accounts = self.accounts.read().unwrap_or_else(PoisonError::into_inner);
        Ok(accounts.get(&id).cloned())
    }

    async fn find_by_identity(&self, identity: &str) -> Result<Option<Account>, DirectoryError> {
        let accounts = self.accounts.read().unwrap_or_else(PoisonError::into_inner);
        Ok(accounts
            .values()
            .find(|account| account.matches_identity(identity))
            .cloned())
    }

    async fn create(&self, new_account: NewAccount) -> Result<Account, DirectoryError> {
        let mut accounts = self.accounts.write().unwrap_or_else(PoisonError::into_inner);

        for existing in accounts.values() {
            if existing.email == new_account.email {
                return Err(DirectoryError::Duplicate(DuplicateField::Email));
            }
            if existing.username == new_account.username {
                return Err(DirectoryError::Duplicate(DuplicateField::Username));
            }
        }

        let account = Account {
            id: AccountId::new(),
            email: new_account.email,
            username: new_account.username,
            password_hash: new_account.password_hash,
            is_active: false,
            role: new_account.role,
            created_at: new_account.created_at,
        };
        accounts.insert(account.id, account.clone());

        Ok(account)
    }

    async fn activate(&self, id: AccountId) -> Result<Account, DirectoryError> {
        let mut accounts = self.accounts.write().unwrap_or_else(PoisonError::into_inner);
        let account = accounts.get_mut(&id).ok_or(DirectoryError::NotFound)?;

        if account.is_active {
            return Err(DirectoryError::AlreadyVerified);
        }
        account.is_active = true;

        Ok(account.clone())
    }

    async fn update_password_hash(
        &self,
        id: AccountId,
        password_hash: &str,
    ) -> Result<(), DirectoryError> {
        let mut accounts = self.accounts.write().unwrap_or_else(PoisonError::into_inner);
        let account = accounts.get_mut(&id).ok_or(DirectoryError::NotFound)?;
        account.password_hash = password_hash.to_string();
        Ok(())
    }

    async fn update_username(
        &self,
        id: AccountId,
        username: &str,
    ) -> Result<Account, DirectoryError> {
        let mut accounts = self.accounts.write().unwrap_or_else(PoisonError::into_inner);

        if accounts
            .values()
            .any(|existing| existing.id != id && existing.username == username)
        {
            return Err(DirectoryError::Duplicate(DuplicateField::Username));
        }

        let account = accounts.get_mut(&id).ok_or(DirectoryError::NotFound)?;
        account.username = username.to_string();
        Ok(account.clone())
    }
}
