use std::sync::Arc;

use acadewave_auth::{TokenError, TokenPurpose, TokenService, VerifyError};
use acadewave_core::{PasswordError, PasswordHasher};
use acadewave_db::{AccountDirectory, DirectoryError, DuplicateField};
use acadewave_models::{
    Account, AccountId, LoginResponse, NewAccount, RegisterRequest, Role, UpdateAccountRequest,
};
use acadewave_observability as observability;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::utils::email::Notifier;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("an account with this {0} already exists")]
    Duplicate(DuplicateField),

    #[error("account is already verified")]
    AlreadyVerified,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account email is not verified")]
    NotVerified,

    #[error(transparent)]
    Token(#[from] VerifyError),

    #[error("token subject does not match any account")]
    UnknownSubject,

    #[error(transparent)]
    Issue(#[from] TokenError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Directory(DirectoryError),
}

impl From<DirectoryError> for AccountError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Duplicate(field) => AccountError::Duplicate(field),
            DirectoryError::AlreadyVerified => AccountError::AlreadyVerified,
            DirectoryError::NotFound => AccountError::UnknownSubject,
            other => AccountError::Directory(other),
        }
    }
}

/// Account lifecycle: registration, email verification, login and password
/// reset.
///
/// Every collaborator is injected, so the same service runs against
/// Postgres in production and the in-memory directory in tests.
#[derive(Clone)]
pub struct AuthService {
    directory: Arc<dyn AccountDirectory>,
    tokens: Arc<TokenService>,
    hasher: Arc<dyn PasswordHasher>,
    notifier: Arc<dyn Notifier>,
}

impl AuthService {
    pub fn new(
        directory: Arc<dyn AccountDirectory>,
        tokens: Arc<TokenService>,
        hasher: Arc<dyn PasswordHasher>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            directory,
            tokens,
            hasher,
            notifier,
        }
    }

    pub fn tokens(&self) -> &Arc<TokenService> {
        &self.tokens
    }

    fn issue(&self, subject: AccountId, purpose: TokenPurpose) -> Result<String, TokenError> {
        let token = self.tokens.issue_token(subject, purpose)?;
        observability::track_token_issued(purpose.as_str());
        Ok(token)
    }

    fn verify(&self, token: &str, purpose: TokenPurpose) -> Result<AccountId, VerifyError> {
        self.tokens.verify_token(token, purpose).map_err(|err| {
            warn!(purpose = %purpose, reason = err.reason(), "Token rejected");
            observability::track_token_rejected(err.reason());
            err
        })
    }

    /// Creates an inactive student account and mails a verification token.
    ///
    /// A failed email does not undo the registration; the user can ask for a
    /// new token.
    #[instrument(skip_all, fields(email = %dto.email, username = %dto.username))]
    pub async fn register(&self, dto: RegisterRequest) -> Result<Account, AccountError> {
        let password_hash = self.hasher.hash(&dto.password)?;

        let account = self
            .directory
            .create(NewAccount {
                email: dto.email,
                username: dto.username,
                password_hash,
                role: Role::Student,
                created_at: self.tokens.now(),
            })
            .await?;

        info!(account_id = %account.id, "Account registered");
        observability::track_account_registered(account.role.as_str());

        let token = self.issue(account.id, TokenPurpose::EmailVerification)?;
        if let Err(e) = self.notifier.send_verification_email(&account, &token).await {
            warn!(account_id = %account.id, error = %e, "Failed to send verification email");
        }

        Ok(account)
    }

    /// Re-sends a verification token. Silent when the identity is unknown or
    /// the account is already active.
    #[instrument(skip(self))]
    pub async fn request_verification(&self, identity: &str) -> Result<(), AccountError> {
        let Some(account) = self.directory.find_by_identity(identity).await? else {
            return Ok(());
        };
        if account.is_active {
            return Ok(());
        }

        let token = self.issue(account.id, TokenPurpose::EmailVerification)?;
        if let Err(e) = self.notifier.send_verification_email(&account, &token).await {
            warn!(account_id = %account.id, error = %e, "Failed to send verification email");
        }

        Ok(())
    }

    #[instrument(skip_all)]
    pub async fn verify_email(&self, token: &str) -> Result<Account, AccountError> {
        let subject = self.verify(token, TokenPurpose::EmailVerification)?;

        let account = self.directory.activate(subject).await?;

        info!(account_id = %account.id, "Email verified");
        observability::track_email_verified();

        Ok(account)
    }

    /// Unknown identities and wrong passwords fail identically. The password
    /// is checked before the activation state so that an unverified account
    /// is only revealed to its owner.
    #[instrument(skip(self, password))]
    pub async fn login(&self, identity: &str, password: &str) -> Result<LoginResponse, AccountError> {
        let Some(account) = self.directory.find_by_identity(identity).await? else {
            observability::track_login_failure("unknown_identity");
            return Err(AccountError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &account.password_hash)? {
            observability::track_login_failure("invalid_password");
            return Err(AccountError::InvalidCredentials);
        }

        if !account.is_active {
            observability::track_login_failure("not_verified");
            return Err(AccountError::NotVerified);
        }

        let access_token = self.issue(account.id, TokenPurpose::Access)?;
        observability::track_login_success(account.role.as_str());
        info!(account_id = %account.id, role = %account.role, "Login succeeded");

        Ok(LoginResponse {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: self.tokens.window(TokenPurpose::Access).num_seconds(),
        })
    }

    /// Mails a reset token if the account exists. Always succeeds toward the
    /// caller.
    #[instrument(skip(self))]
    pub async fn forgot_password(&self, identity: &str) -> Result<(), AccountError> {
        let Some(account) = self.directory.find_by_identity(identity).await? else {
            return Ok(());
        };

        let token = self.issue(account.id, TokenPurpose::PasswordReset)?;
        if let Err(e) = self.notifier.send_password_reset_email(&account, &token).await {
            warn!(account_id = %account.id, error = %e, "Failed to send password reset email");
        }

        Ok(())
    }

    /// Stores the new password hash, then sends a confirmation email.
    #[instrument(skip_all)]
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AccountError> {
        let subject = self.verify(token, TokenPurpose::PasswordReset)?;

        let account = self
            .directory
            .find_by_id(subject)
            .await?
            .ok_or(AccountError::UnknownSubject)?;

        let password_hash = self.hasher.hash(new_password)?;
        self.directory
            .update_password_hash(account.id, &password_hash)
            .await?;

        info!(account_id = %account.id, "Password reset");
        observability::track_password_reset();

        if let Err(e) = self.notifier.send_password_reset_confirmation(&account).await {
            warn!(account_id = %account.id, error = %e, "Failed to send password reset confirmation");
        }

        Ok(())
    }

    /// Applies a self-service change of username and/or password and
    /// returns the stored account.
    ///
    /// The rename runs first, so a username collision leaves the account
    /// untouched.
    #[instrument(skip_all, fields(account_id = %account.id))]
    pub async fn update_profile(
        &self,
        account: &Account,
        dto: UpdateAccountRequest,
    ) -> Result<Account, AccountError> {
        if let Some(username) = dto.username.as_deref()
            && username != account.username
        {
            self.directory.update_username(account.id, username).await?;
            info!(username, "Username changed");
        }

        if let Some(password) = dto.password.as_deref() {
            let password_hash = self.hasher.hash(password)?;
            self.directory
                .update_password_hash(account.id, &password_hash)
                .await?;
            info!("Password changed");
        }

        self.directory
            .find_by_id(account.id)
            .await?
            .ok_or(AccountError::UnknownSubject)
    }
}
