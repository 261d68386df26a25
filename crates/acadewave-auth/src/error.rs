//! Failure taxonomy for token handling and authorization.
//!
//! Every variant is terminal; nothing here is worth retrying.

use acadewave_db::DirectoryError;
use acadewave_models::Role;
use thiserror::Error;

use crate::purpose::TokenPurpose;

/// Why a token string could not be turned back into claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Bad structure, encoding, JSON, missing claim or unexpected algorithm.
    #[error("malformed token")]
    Malformed,
    #[error("token signature mismatch")]
    Signature,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to encode token: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),

    #[error("token validity window must be positive")]
    InvalidWindow,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error(transparent)]
    Invalid(#[from] DecodeError),

    #[error("token purpose mismatch: expected {expected}, got {actual}")]
    WrongPurpose {
        expected: TokenPurpose,
        actual: TokenPurpose,
    },

    #[error("token has expired")]
    Expired,

    #[error("token is not yet valid")]
    NotYetValid,
}

impl VerifyError {
    /// Message safe to show a client. Decode failures and clock skew all
    /// read the same so that a caller cannot tell which check failed.
    pub fn public_message(&self) -> &'static str {
        match self {
            VerifyError::Expired => "Token has expired",
            _ => "Invalid token",
        }
    }

    /// Short label for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            VerifyError::Invalid(DecodeError::Malformed) => "malformed",
            VerifyError::Invalid(DecodeError::Signature) => "signature",
            VerifyError::WrongPurpose { .. } => "wrong_purpose",
            VerifyError::Expired => "expired",
            VerifyError::NotYetValid => "not_yet_valid",
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Token(#[from] VerifyError),

    #[error("token subject does not match any account")]
    UnknownSubject,

    #[error("account is not active")]
    Inactive,

    #[error("role '{role}' is not permitted here")]
    Forbidden { role: Role, required: Vec<Role> },

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl AuthError {
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::Token(err) => err.reason(),
            AuthError::UnknownSubject => "unknown_subject",
            AuthError::Inactive => "inactive",
            AuthError::Forbidden { .. } => "forbidden",
            AuthError::Directory(_) => "directory",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_failures_share_public_message() {
        let malformed = VerifyError::Invalid(DecodeError::Malformed);
        let signature = VerifyError::Invalid(DecodeError::Signature);
        assert_eq!(malformed.public_message(), signature.public_message());
        assert_eq!(
            VerifyError::NotYetValid.public_message(),
            malformed.public_message()
        );
        assert_eq!(VerifyError::Expired.public_message(), "Token has expired");
    }

    #[test]
    fn test_reasons_are_distinct_for_logging() {
        assert_eq!(
            VerifyError::Invalid(DecodeError::Malformed).reason(),
            "malformed"
        );
        assert_eq!(
            VerifyError::Invalid(DecodeError::Signature).reason(),
            "signature"
        );
        assert_eq!(
            AuthError::Forbidden {
                role: Role::Student,
                required: vec![Role::Admin]
            }
            .reason(),
            "forbidden"
        );
        assert_eq!(
            AuthError::from(VerifyError::Expired).reason(),
            "expired"
        );
    }
}
