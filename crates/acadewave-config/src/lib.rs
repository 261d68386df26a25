//! # Acadewave Config
//!
//! Configuration structures loaded from environment variables once at
//! startup and passed by reference into the constructors that need them.
//!
//! - [`jwt`]: signing key and per-purpose token lifetimes
//! - [`email`]: SMTP settings for verification and reset emails
//! - [`cors`]: allowed browser origins
//!
//! # Example
//!
//! ```ignore
//! use acadewave_config::AppConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = AppConfig::from_env();
//! let tokens = TokenService::new(&config.jwt, clock);
//! ```

use std::env;
use std::str::FromStr;

pub mod cors;
pub mod email;
pub mod jwt;

pub use cors::CorsConfig;
pub use email::EmailConfig;
pub use jwt::JwtConfig;

/// Top-level process configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub jwt: JwtConfig,
    pub email: EmailConfig,
    pub cors: CorsConfig,
    /// Socket address the HTTP server binds to.
    pub server_addr: String,
    /// PostgreSQL URL. When unset the server keeps accounts in memory.
    pub database_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            jwt: JwtConfig::from_env(),
            email: EmailConfig::from_env(),
            cors: CorsConfig::from_env(),
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
        }
    }
}

/// Reads `key` and parses it, falling back to `default` when the variable is
/// missing or unparseable.
pub(crate) fn env_parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

pub(crate) fn env_flag(key: &str) -> bool {
    env::var(key)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false)
}
