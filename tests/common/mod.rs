#![allow(dead_code)]

use std::sync::{Arc, Mutex, PoisonError};

use acadewave::router::init_router;
use acadewave::state::AppState;
use acadewave::utils::email::{Notifier, NotifyError};
use acadewave_config::{AppConfig, CorsConfig, EmailConfig, JwtConfig};
use acadewave_core::{BcryptHasher, Clock, ManualClock, PasswordHasher};
use acadewave_db::{AccountDirectory, MemoryAccountDirectory};
use acadewave_models::{Account, NewAccount, Role};
use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use chrono::{DateTime, TimeZone, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_PASSWORD: &str = "password123";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sent {
    Verification,
    PasswordReset,
    ResetConfirmation,
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub kind: Sent,
    pub to: String,
    pub token: Option<String>,
}

/// Notifier that keeps every message in memory.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<SentEmail>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Most recent token of `kind` mailed to `to`.
    pub fn last_token(&self, kind: Sent, to: &str) -> Option<String> {
        self.sent()
            .into_iter()
            .rev()
            .find(|email| email.kind == kind && email.to == to)
            .and_then(|email| email.token)
    }

    fn record(&self, kind: Sent, to: &Account, token: Option<&str>) {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SentEmail {
                kind,
                to: to.email.clone(),
                token: token.map(str::to_string),
            });
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_verification_email(&self, to: &Account, token: &str) -> Result<(), NotifyError> {
        self.record(Sent::Verification, to, Some(token));
        Ok(())
    }

    async fn send_password_reset_email(
        &self,
        to: &Account,
        token: &str,
    ) -> Result<(), NotifyError> {
        self.record(Sent::PasswordReset, to, Some(token));
        Ok(())
    }

    async fn send_password_reset_confirmation(&self, to: &Account) -> Result<(), NotifyError> {
        self.record(Sent::ResetConfirmation, to, None);
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub clock: Arc<ManualClock>,
    pub directory: Arc<MemoryAccountDirectory>,
    pub notifier: Arc<RecordingNotifier>,
    pub hasher: Arc<BcryptHasher>,
}

pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 1, 8, 0, 0).unwrap()
}

pub fn test_config() -> AppConfig {
    AppConfig {
        jwt: JwtConfig::with_secret(TEST_SECRET),
        email: EmailConfig::disabled(),
        cors: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        server_addr: "127.0.0.1:0".to_string(),
        database_url: None,
    }
}

pub fn spawn_app() -> TestApp {
    let clock = Arc::new(ManualClock::new(start()));
    let directory = Arc::new(MemoryAccountDirectory::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let hasher = Arc::new(BcryptHasher::new(4));

    let state = AppState::new(
        test_config(),
        directory.clone() as Arc<dyn AccountDirectory>,
        clock.clone() as Arc<dyn Clock>,
        hasher.clone() as Arc<dyn PasswordHasher>,
        notifier.clone() as Arc<dyn Notifier>,
    );

    TestApp {
        router: init_router(state.clone()),
        state,
        clock,
        directory,
        notifier,
        hasher,
    }
}

impl TestApp {
    /// Inserts an account directly, bypassing registration.
    pub async fn seed_account(&self, username: &str, role: Role, active: bool) -> Account {
        let account = self
            .directory
            .create(NewAccount {
                email: format!("{username}@example.com"),
                username: username.to_string(),
                password_hash: self.hasher.hash(TEST_PASSWORD).unwrap(),
                role,
                created_at: self.clock.now(),
            })
            .await
            .unwrap();

        if active {
            self.directory.activate(account.id).await.unwrap()
        } else {
            account
        }
    }

    /// Seeds an active account and logs it in.
    pub async fn login_as(&self, username: &str, role: Role) -> String {
        self.seed_account(username, role, true).await;
        let (status, body) = self
            .post(
                "/api/auth/login",
                serde_json::json!({ "identity": username, "password": TEST_PASSWORD }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["access_token"].as_str().unwrap().to_string()
    }

    pub async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, path, Some(body), None).await
    }

    pub async fn patch(&self, path: &str, body: Value, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::PATCH, path, Some(body), token).await
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, path, None, token).await
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, value)
    }
}
