use std::sync::Arc;

use acadewave_models::AccountId;
use chrono::{DateTime, Duration, Utc};

use crate::claims::TokenClaims;
use crate::codec::TokenCodec;
use crate::error::TokenError;
use crate::purpose::{TokenPurpose, ValidityWindows};

/// Mints purpose-scoped tokens. Holds no mutable state.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    codec: Arc<TokenCodec>,
    windows: ValidityWindows,
}

impl TokenIssuer {
    pub fn new(codec: Arc<TokenCodec>, windows: ValidityWindows) -> Self {
        Self { codec, windows }
    }

    pub fn windows(&self) -> &ValidityWindows {
        &self.windows
    }

    /// Issues a token valid from `now` for the purpose's configured window.
    pub fn issue(
        &self,
        subject: AccountId,
        purpose: TokenPurpose,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        self.issue_with_window(subject, purpose, now, self.windows.window(purpose))
    }

    /// Issues a token with an explicit lifetime.
    ///
    /// The window must cover at least one whole second so that `exp > iat`.
    pub fn issue_with_window(
        &self,
        subject: AccountId,
        purpose: TokenPurpose,
        now: DateTime<Utc>,
        window: Duration,
    ) -> Result<String, TokenError> {
        let seconds = window.num_seconds();
        if seconds <= 0 {
            return Err(TokenError::InvalidWindow);
        }

        let iat = now.timestamp();
        let claims = TokenClaims {
            sub: subject,
            purpose,
            iat,
            exp: iat + seconds,
        };

        self.codec.encode(&claims)
    }
}
