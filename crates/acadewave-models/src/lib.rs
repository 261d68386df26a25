//! # Acadewave Models
//!
//! Domain types and request/response DTOs shared by the storage, token and
//! HTTP layers.
//!
//! - [`ids`]: the [`AccountId`] newtype carried as token subject
//! - [`accounts`]: [`Account`], [`NewAccount`] and the [`Role`] enum
//! - [`auth`]: lifecycle request and response bodies
//!
//! # Example
//!
//! ```ignore
//! use acadewave_models::{Account, Role};
//!
//! fn can_grade(account: &Account) -> bool {
//!     matches!(account.role, Role::Admin | Role::Teacher)
//! }
//! ```

pub mod accounts;
pub mod auth;
pub mod ids;

pub use accounts::{Account, AccountResponse, NewAccount, ParseRoleError, Role};
pub use auth::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
    RequestVerificationRequest, ResetPasswordRequest, UpdateAccountRequest, VerifyEmailRequest,
};
pub use ids::AccountId;
