//! Shared utilities.
//!
//! - [`email`]: the [`Notifier`](email::Notifier) seam and its SMTP implementation
//! - [`errors`]: [`AppError`](errors::AppError) and the status mapping for
//!   every library error

pub mod email;
pub mod errors;
