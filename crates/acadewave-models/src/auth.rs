//! Account lifecycle request and response bodies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Self-registration. Always creates a student account.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email)]
    #[schema(example = "student@example.com")]
    pub email: String,
    #[validate(
        length(min = 3, max = 32),
        custom(function = "validate_username")
    )]
    #[schema(example = "ada_l")]
    pub username: String,
    #[validate(length(min = 8))]
    #[schema(example = "password123")]
    pub password: String,
}

/// Usernames are limited to ASCII letters, digits, `_`, `.` and `-`.
///
/// They share a lookup path with emails, so `@` is never allowed, and they
/// are rendered into outgoing HTML mail, so markup characters are not either.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.contains('@') {
        return Err(ValidationError::new("username_contains_at")
            .with_message("username may not contain '@'".into()));
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-');
    if !username.chars().all(allowed) {
        return Err(ValidationError::new("username_invalid_characters").with_message(
            "username may only contain letters, digits, '_', '.' and '-'".into(),
        ));
    }
    Ok(())
}

/// Login by email or username.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    #[schema(example = "student@example.com")]
    pub identity: String,
    #[validate(length(min = 1))]
    #[schema(example = "password123")]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
    /// Lifetime of `access_token` in seconds.
    pub expires_in: i64,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct VerifyEmailRequest {
    #[validate(length(min = 1))]
    pub token: String,
}

/// Ask for a fresh verification email.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RequestVerificationRequest {
    #[validate(length(min = 1))]
    #[schema(example = "student@example.com")]
    pub identity: String,
}

/// Starts a password reset. The response never reveals whether the account
/// exists.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ForgotPasswordRequest {
    #[validate(length(min = 1))]
    #[schema(example = "student@example.com")]
    pub identity: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1))]
    pub token: String,
    #[validate(length(min = 8))]
    #[schema(example = "newPassword123")]
    pub new_password: String,
}

/// Self-service profile change. Fields left out stay as they are.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAccountRequest {
    #[validate(
        length(min = 3, max = 32),
        custom(function = "validate_username")
    )]
    #[schema(example = "ada_lovelace")]
    pub username: Option<String>,
    #[validate(length(min = 8))]
    #[schema(example = "newPassword123")]
    pub password: Option<String>,
}

impl UpdateAccountRequest {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

/// Generic success message response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
