//! Authentication and authorization for incoming requests.
//!
//! - [`auth`]: the `AuthUser` extractor and bearer-token parsing
//! - [`role`]: role layers and role extractors
//!
//! # Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. The token is verified as an access token and its subject resolved to
//!    a stored account
//! 3. The account's role is checked against the route's allowed set
//! 4. The handler runs with the account in hand
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//! use crate::middleware::role::RequireAdmin;
//!
//! async fn profile(AuthUser(account): AuthUser) -> impl IntoResponse { /* any role */ }
//!
//! async fn admin_panel(RequireAdmin(admin): RequireAdmin) -> impl IntoResponse { /* admins */ }
//! ```

pub mod auth;
pub mod role;
