use std::fmt;

use acadewave_config::JwtConfig;
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// What a token may be used for. A token minted for one purpose is never
/// accepted where another is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    Access,
    EmailVerification,
    PasswordReset,
}

impl TokenPurpose {
    pub const ALL: [TokenPurpose; 3] = [
        TokenPurpose::Access,
        TokenPurpose::EmailVerification,
        TokenPurpose::PasswordReset,
    ];

    /// Built-in lifetime used when configuration does not override it.
    pub fn default_window(&self) -> Duration {
        match self {
            TokenPurpose::Access => Duration::minutes(60),
            TokenPurpose::EmailVerification => Duration::minutes(30),
            TokenPurpose::PasswordReset => Duration::minutes(15),
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            TokenPurpose::Access => "access",
            TokenPurpose::EmailVerification => "email_verification",
            TokenPurpose::PasswordReset => "password_reset",
        }
    }
}

impl fmt::Display for TokenPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-purpose token lifetimes fixed at process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityWindows {
    access: Duration,
    email_verification: Duration,
    password_reset: Duration,
}

impl Default for ValidityWindows {
    fn default() -> Self {
        Self {
            access: TokenPurpose::Access.default_window(),
            email_verification: TokenPurpose::EmailVerification.default_window(),
            password_reset: TokenPurpose::PasswordReset.default_window(),
        }
    }
}

impl ValidityWindows {
    /// Reads the lifetimes from configuration. Non-positive values, and
    /// values too large to represent, fall back to the purpose's default.
    pub fn from_config(config: &JwtConfig) -> Self {
        let pick = |minutes: i64, purpose: TokenPurpose| {
            Some(minutes)
                .filter(|m| *m > 0)
                .and_then(Duration::try_minutes)
                .unwrap_or_else(|| purpose.default_window())
        };

        Self {
            access: pick(config.access_token_expiry_minutes, TokenPurpose::Access),
            email_verification: pick(
                config.verification_token_expiry_minutes,
                TokenPurpose::EmailVerification,
            ),
            password_reset: pick(
                config.reset_token_expiry_minutes,
                TokenPurpose::PasswordReset,
            ),
        }
    }

    pub fn window(&self, purpose: TokenPurpose) -> Duration {
        match purpose {
            TokenPurpose::Access => self.access,
            TokenPurpose::EmailVerification => self.email_verification,
            TokenPurpose::PasswordReset => self.password_reset,
        }
    }
}
