//! # Acadewave Core
//!
//! Leaf primitives shared by every other Acadewave crate.
//!
//! - [`clock`]: the injected time source used for token issuance and expiry
//! - [`password`]: the opaque password hashing capability (bcrypt-backed)
//!
//! # Example
//!
//! ```ignore
//! use acadewave_core::{BcryptHasher, Clock, PasswordHasher, SystemClock};
//!
//! let hasher = BcryptHasher::default();
//! let hash = hasher.hash("secure_password")?;
//! assert!(hasher.verify("secure_password", &hash)?);
//!
//! let now = SystemClock.now();
//! ```

pub mod clock;
pub mod password;

pub use clock::{Clock, ManualClock, SystemClock};
pub use password::{BcryptHasher, PasswordError, PasswordHasher, hash_password, verify_password};
