use std::env;

use crate::{env_flag, env_parse_or};

/// SMTP delivery settings.
///
/// With `enabled = false` outbound mail is logged instead of sent, which is
/// the default for local development.
#[derive(Clone, Debug)]
pub struct EmailConfig {
    pub enabled: bool,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_email: String,
    pub from_name: String,
    /// Base URL of the web client; verification and reset links point here.
    pub frontend_url: String,
}

impl EmailConfig {
    pub fn from_env() -> Self {
        Self {
            enabled: env_flag("SMTP_ENABLED"),
            smtp_host: env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
            smtp_port: env_parse_or("SMTP_PORT", 1025),
            smtp_username: env::var("SMTP_USERNAME").unwrap_or_default(),
            smtp_password: env::var("SMTP_PASSWORD").unwrap_or_default(),
            from_email: env::var("FROM_EMAIL")
                .unwrap_or_else(|_| "noreply@acadewave.app".to_string()),
            from_name: env::var("FROM_NAME").unwrap_or_else(|_| "Acadewave".to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
        }
    }

    /// Delivery switched off; used by tests and local runs.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            smtp_host: "localhost".to_string(),
            smtp_port: 1025,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_email: "noreply@acadewave.app".to_string(),
            from_name: "Acadewave".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
        }
    }
}
