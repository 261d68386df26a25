use acadewave_models::AccountId;
use serde::{Deserialize, Serialize};

use crate::purpose::TokenPurpose;

/// The claim set signed into every token.
///
/// `iat` and `exp` are Unix seconds and `exp > iat` always holds for tokens
/// produced by [`TokenIssuer`](crate::TokenIssuer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: AccountId,
    pub purpose: TokenPurpose,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    /// Seconds between issue and expiry.
    pub fn lifetime_seconds(&self) -> i64 {
        self.exp - self.iat
    }
}
