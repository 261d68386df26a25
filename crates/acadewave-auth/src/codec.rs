//! HS256 token encoding and decoding.
//!
//! The codec only proves integrity. It does not look at `iat` or `exp`;
//! time checks belong to [`TokenVerifier`](crate::TokenVerifier), which runs
//! them against an injected clock.

use std::fmt;

use acadewave_config::JwtConfig;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::claims::TokenClaims;
use crate::error::{DecodeError, TokenError};

pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    header: Header,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            header: Header::new(Algorithm::HS256),
            validation,
        }
    }

    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(config.secret.as_bytes())
    }

    /// Signs `claims`. The output is deterministic for a given key and claim
    /// set.
    pub fn encode(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        Ok(encode(&self.header, claims, &self.encoding_key)?)
    }

    /// Checks the signature over header and payload, then parses the claims.
    pub fn decode(&self, token: &str) -> Result<TokenClaims, DecodeError> {
        decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::InvalidSignature => DecodeError::Signature,
                _ => DecodeError::Malformed,
            })
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.header.alg)
            .finish_non_exhaustive()
    }
}
