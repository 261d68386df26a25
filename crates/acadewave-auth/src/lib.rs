//! # Acadewave Auth
//!
//! Token lifecycle and role-based authorization.
//!
//! This crate provides:
//!
//! - [`purpose`]: the three token purposes and their validity windows
//! - [`claims`]: the claim set carried inside every token
//! - [`codec`]: HS256 signing and signature-first decoding
//! - [`issuer`] / [`verifier`]: purpose-scoped minting and checking against
//!   an explicit `now`
//! - [`service`]: [`TokenService`], which binds issuer and verifier to a
//!   [`Clock`](acadewave_core::Clock)
//! - [`gate`]: [`AuthorizationGate`], the role check applied per request
//!
//! Nothing in here logs or touches the network; callers decide how failures
//! are reported.
//!
//! # Example
//!
//! ```ignore
//! use acadewave_auth::{AuthorizationGate, TokenPurpose, TokenService};
//! use acadewave_models::Role;
//!
//! let tokens = Arc::new(TokenService::new(&config.jwt, Arc::new(SystemClock)));
//! let token = tokens.issue_token(account.id, TokenPurpose::Access)?;
//!
//! let gate = AuthorizationGate::new(tokens, directory);
//! let admin = gate.authorize(&token, &[Role::Admin]).await?;
//! ```

pub mod claims;
pub mod codec;
pub mod error;
pub mod gate;
pub mod issuer;
pub mod purpose;
pub mod service;
pub mod verifier;

pub use claims::TokenClaims;
pub use codec::TokenCodec;
pub use error::{AuthError, DecodeError, TokenError, VerifyError};
pub use gate::{AuthorizationGate, check_role};
pub use issuer::TokenIssuer;
pub use purpose::{TokenPurpose, ValidityWindows};
pub use service::TokenService;
pub use verifier::TokenVerifier;
