use std::sync::Arc;

use acadewave_auth::{AuthorizationGate, TokenService, ValidityWindows};
use acadewave_config::AppConfig;
use acadewave_core::{BcryptHasher, Clock, PasswordHasher, SystemClock};
use acadewave_db::{
    AccountDirectory, MemoryAccountDirectory, PgAccountDirectory, init_db_pool, run_migrations,
};
use anyhow::Context;
use tracing::{info, warn};

use crate::modules::auth::service::AuthService;
use crate::utils::email::{EmailService, Notifier};

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub gate: AuthorizationGate,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Wires the token service, gate and lifecycle service around one shared
    /// directory and clock.
    pub fn new(
        config: AppConfig,
        directory: Arc<dyn AccountDirectory>,
        clock: Arc<dyn Clock>,
        hasher: Arc<dyn PasswordHasher>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let tokens = Arc::new(TokenService::new(&config.jwt, clock));
        let gate = AuthorizationGate::new(tokens.clone(), directory.clone());
        let auth = AuthService::new(directory, tokens, hasher, notifier);

        Self {
            auth,
            gate,
            config: Arc::new(config),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("gate", &self.gate)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

pub async fn init_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let directory: Arc<dyn AccountDirectory> = match config.database_url.as_deref() {
        Some(url) => {
            let pool = init_db_pool(url)
                .await
                .context("failed to connect to database")?;
            run_migrations(&pool)
                .await
                .context("failed to run database migrations")?;
            info!("Using PostgreSQL account directory");
            Arc::new(PgAccountDirectory::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set; accounts are kept in memory and lost on restart");
            Arc::new(MemoryAccountDirectory::new())
        }
    };

    let windows = ValidityWindows::from_config(&config.jwt);
    let notifier = Arc::new(EmailService::new(config.email.clone(), &windows));

    Ok(AppState::new(
        config,
        directory,
        Arc::new(SystemClock),
        Arc::new(BcryptHasher::default()),
        notifier,
    ))
}
