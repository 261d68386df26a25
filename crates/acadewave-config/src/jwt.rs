use std::env;
use std::fmt;

use crate::env_parse_or;

pub const DEFAULT_ACCESS_TOKEN_MINUTES: i64 = 60;
pub const DEFAULT_VERIFICATION_TOKEN_MINUTES: i64 = 30;
pub const DEFAULT_RESET_TOKEN_MINUTES: i64 = 15;

/// Token signing settings.
///
/// The secret is the process-wide HMAC key; changing it invalidates every
/// outstanding token.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_minutes: i64,
    pub verification_token_expiry_minutes: i64,
    pub reset_token_expiry_minutes: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            access_token_expiry_minutes: env_parse_or(
                "ACCESS_TOKEN_EXPIRE_MINUTES",
                DEFAULT_ACCESS_TOKEN_MINUTES,
            ),
            verification_token_expiry_minutes: env_parse_or(
                "VERIFICATION_TOKEN_EXPIRE_MINUTES",
                DEFAULT_VERIFICATION_TOKEN_MINUTES,
            ),
            reset_token_expiry_minutes: env_parse_or(
                "RESET_TOKEN_EXPIRE_MINUTES",
                DEFAULT_RESET_TOKEN_MINUTES,
            ),
        }
    }

    /// Config with the standard lifetimes and the given secret.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_token_expiry_minutes: DEFAULT_ACCESS_TOKEN_MINUTES,
            verification_token_expiry_minutes: DEFAULT_VERIFICATION_TOKEN_MINUTES,
            reset_token_expiry_minutes: DEFAULT_RESET_TOKEN_MINUTES,
        }
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_expiry_minutes", &self.access_token_expiry_minutes)
            .field(
                "verification_token_expiry_minutes",
                &self.verification_token_expiry_minutes,
            )
            .field("reset_token_expiry_minutes", &self.reset_token_expiry_minutes)
            .finish()
    }
}
