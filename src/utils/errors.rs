use acadewave_auth::{AuthError, TokenError, VerifyError};
use acadewave_core::PasswordError;
use acadewave_db::DirectoryError;
use anyhow::{Error, anyhow};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::modules::auth::service::AccountError;
use crate::utils::email::NotifyError;

/// Error returned by every handler.
///
/// Library errors are converted with explicit `From` impls so that each
/// failure lands on a deliberate status code. Server errors are logged and
/// replaced with a generic message before reaching the client.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, anyhow!(message.into()))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow!(message.into()))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow!(message.into()))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, anyhow!(message.into()))
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, anyhow!(message.into()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = ?self.error, "Request failed");
            "Internal server error".to_string()
        } else {
            self.error.to_string()
        };

        (self.status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        AppError::internal(err)
    }
}

/// Failures of an access token presented as a bearer credential.
impl From<VerifyError> for AppError {
    fn from(err: VerifyError) -> Self {
        AppError::unauthorized(err.public_message())
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Token(err) => err.into(),
            AuthError::UnknownSubject => AppError::unauthorized("Invalid token"),
            AuthError::Inactive => AppError::forbidden("Account is not active"),
            AuthError::Forbidden { required, .. } => {
                let required = required
                    .iter()
                    .map(|role| role.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                AppError::forbidden(format!("Access denied. Required roles: {}", required))
            }
            AuthError::Directory(err) => err.into(),
        }
    }
}

impl From<DirectoryError> for AppError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Duplicate(field) => {
                AppError::conflict(format!("An account with this {} already exists", field))
            }
            DirectoryError::AlreadyVerified => AppError::bad_request("Email is already verified"),
            DirectoryError::NotFound => AppError::new(StatusCode::NOT_FOUND, err),
            DirectoryError::Backend(_) => AppError::internal(err),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        AppError::internal(err)
    }
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        AppError::internal(err)
    }
}

impl From<NotifyError> for AppError {
    fn from(err: NotifyError) -> Self {
        AppError::internal(err)
    }
}

/// Lifecycle tokens (verification, reset) arrive in a request body, so their
/// failures are reported as bad requests rather than authentication errors.
impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Duplicate(field) => {
                AppError::conflict(format!("An account with this {} already exists", field))
            }
            AccountError::AlreadyVerified => AppError::bad_request("Email is already verified"),
            AccountError::InvalidCredentials => AppError::unauthorized("Invalid credentials"),
            AccountError::NotVerified => {
                AppError::forbidden("Email address has not been verified")
            }
            AccountError::Token(err) => AppError::bad_request(err.public_message()),
            AccountError::UnknownSubject => AppError::bad_request("Invalid token"),
            AccountError::Issue(err) => err.into(),
            AccountError::Password(err) => err.into(),
            AccountError::Directory(err) => err.into(),
        }
    }
}
