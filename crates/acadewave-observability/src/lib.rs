//! Acadewave Observability
//!
//! Provides:
//! - Structured logging to the console and rolling JSON files
//! - Distributed tracing via OpenTelemetry
//! - Prometheus metrics, including auth counters (tokens issued, tokens
//!   rejected, access denied, logins)
//! - HTTP request/response logging
//!
//! The heavy parts compile only with the `observability` feature (on by
//! default). At runtime they can be switched off with
//! `OBSERVABILITY_ENABLED=false`, which falls back to console logging.
//!
//! # Examples
//!
//! ```no_run
//! use acadewave_observability::{init_tracing, shutdown_tracer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     init_tracing()?;
//!     // ... application code ...
//!     shutdown_tracer().await;
//!     Ok(())
//! }
//! ```

pub mod basic_logging;
#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

pub use basic_logging::init_basic_console_logging;

#[cfg(feature = "observability")]
pub use metrics_exporter_prometheus::PrometheusHandle;

#[cfg(feature = "observability")]
pub use logging::{init_tracing, logging_middleware, shutdown_tracer};
#[cfg(feature = "observability")]
pub use metrics::{
    init_metrics, metrics_app, metrics_middleware, track_access_denied, track_account_registered,
    track_email_verified, track_login_failure, track_login_success, track_password_reset,
    track_token_issued, track_token_rejected,
};

#[cfg(feature = "observability")]
static OBSERVABILITY_ENABLED: std::sync::OnceLock<bool> = std::sync::OnceLock::new();

/// Runtime switch read once from `OBSERVABILITY_ENABLED`. On unless set to
/// `false` or `0`.
#[cfg(feature = "observability")]
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true)
    })
}

// No-op stubs when observability is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{Router, extract::Request, middleware::Next, response::Response};

    /// Stand-in for the Prometheus handle; never constructed.
    #[derive(Debug, Clone)]
    pub struct PrometheusHandle(());

    pub fn is_observability_enabled() -> bool {
        false
    }

    pub async fn logging_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    /// Console logging only.
    pub fn init_tracing() -> anyhow::Result<()> {
        crate::basic_logging::init_basic_console_logging();
        Ok(())
    }

    pub async fn shutdown_tracer() {}

    pub fn init_metrics() -> anyhow::Result<Option<PrometheusHandle>> {
        Ok(None)
    }

    pub fn metrics_app(_handle: PrometheusHandle) -> Router {
        Router::new()
    }

    pub fn track_token_issued(_purpose: &str) {}
    pub fn track_token_rejected(_reason: &str) {}
    pub fn track_access_denied(_reason: &str) {}
    pub fn track_account_registered(_role: &str) {}
    pub fn track_email_verified() {}
    pub fn track_login_success(_role: &str) {}
    pub fn track_login_failure(_reason: &str) {}
    pub fn track_password_reset() {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
