use std::sync::Arc;

use acadewave_models::AccountId;
use chrono::{DateTime, Utc};

use crate::claims::TokenClaims;
use crate::codec::TokenCodec;
use crate::error::VerifyError;
use crate::purpose::TokenPurpose;

/// Checks tokens against an expected purpose and an explicit `now`.
///
/// A token is accepted when `iat <= now <= exp`. Tokens are not consumed;
/// the same token verifies any number of times until it expires.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    codec: Arc<TokenCodec>,
}

impl TokenVerifier {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }

    pub fn verify(
        &self,
        token: &str,
        expected: TokenPurpose,
        now: DateTime<Utc>,
    ) -> Result<AccountId, VerifyError> {
        self.verify_claims(token, expected, now)
            .map(|claims| claims.sub)
    }

    /// Same checks as [`verify`](Self::verify) but returns the whole claim set.
    pub fn verify_claims(
        &self,
        token: &str,
        expected: TokenPurpose,
        now: DateTime<Utc>,
    ) -> Result<TokenClaims, VerifyError> {
        let claims = self.codec.decode(token)?;

        if claims.purpose != expected {
            return Err(VerifyError::WrongPurpose {
                expected,
                actual: claims.purpose,
            });
        }

        let now = now.timestamp();
        if now > claims.exp {
            return Err(VerifyError::Expired);
        }
        if now < claims.iat {
            return Err(VerifyError::NotYetValid);
        }

        Ok(claims)
    }
}
