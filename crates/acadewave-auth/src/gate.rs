//! Role-based access decisions.
//!
//! The gate resolves a bearer token to a stored account and admits it only
//! if its role is in the required set. The account is looked up on every
//! call, so nothing about the account is cached in the token beyond its id.

use std::sync::Arc;

use acadewave_db::AccountDirectory;
use acadewave_models::{Account, Role};
use chrono::{DateTime, Utc};

use crate::error::AuthError;
use crate::purpose::TokenPurpose;
use crate::service::TokenService;

#[derive(Clone)]
pub struct AuthorizationGate {
    tokens: Arc<TokenService>,
    directory: Arc<dyn AccountDirectory>,
}

impl AuthorizationGate {
    pub fn new(tokens: Arc<TokenService>, directory: Arc<dyn AccountDirectory>) -> Self {
        Self { tokens, directory }
    }

    /// Authorizes an access token for `required_roles` at the current time.
    pub async fn authorize(
        &self,
        token: &str,
        required_roles: &[Role],
    ) -> Result<Account, AuthError> {
        self.authorize_at(token, TokenPurpose::Access, required_roles, self.tokens.now())
            .await
    }

    /// Verify, resolve, refuse inactive accounts, then check the role. An
    /// empty `required_roles` denies everyone.
    pub async fn authorize_at(
        &self,
        token: &str,
        expected_purpose: TokenPurpose,
        required_roles: &[Role],
        now: DateTime<Utc>,
    ) -> Result<Account, AuthError> {
        let subject = self
            .tokens
            .verifier()
            .verify(token, expected_purpose, now)?;

        let account = self
            .directory
            .find_by_id(subject)
            .await?
            .ok_or(AuthError::UnknownSubject)?;

        if !account.is_active {
            return Err(AuthError::Inactive);
        }
        check_role(&account, required_roles)?;

        Ok(account)
    }
}

/// Fails with [`AuthError::Forbidden`] unless the account's role is listed.
pub fn check_role(account: &Account, required_roles: &[Role]) -> Result<(), AuthError> {
    if required_roles.contains(&account.role) {
        Ok(())
    } else {
        Err(AuthError::Forbidden {
            role: account.role,
            required: required_roles.to_vec(),
        })
    }
}

impl std::fmt::Debug for AuthorizationGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationGate")
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}
