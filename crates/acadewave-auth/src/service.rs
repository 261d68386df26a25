use std::sync::Arc;

use acadewave_config::JwtConfig;
use acadewave_core::Clock;
use acadewave_models::AccountId;
use chrono::{DateTime, Duration, Utc};

use crate::codec::TokenCodec;
use crate::error::{TokenError, VerifyError};
use crate::issuer::TokenIssuer;
use crate::purpose::{TokenPurpose, ValidityWindows};
use crate::verifier::TokenVerifier;

/// Issuer and verifier sharing one signing key and one clock.
///
/// This is the handle the rest of the application holds; it is cheap to
/// share behind an `Arc`.
#[derive(Clone)]
pub struct TokenService {
    issuer: TokenIssuer,
    verifier: TokenVerifier,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    pub fn new(config: &JwtConfig, clock: Arc<dyn Clock>) -> Self {
        let codec = Arc::new(TokenCodec::from_config(config));
        Self::from_parts(codec, ValidityWindows::from_config(config), clock)
    }

    pub fn from_parts(
        codec: Arc<TokenCodec>,
        windows: ValidityWindows,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            issuer: TokenIssuer::new(Arc::clone(&codec), windows),
            verifier: TokenVerifier::new(codec),
            clock,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn window(&self, purpose: TokenPurpose) -> Duration {
        self.issuer.windows().window(purpose)
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    pub fn issue_token(
        &self,
        subject: AccountId,
        purpose: TokenPurpose,
    ) -> Result<String, TokenError> {
        self.issuer.issue(subject, purpose, self.now())
    }

    pub fn verify_token(
        &self,
        token: &str,
        expected: TokenPurpose,
    ) -> Result<AccountId, VerifyError> {
        self.verifier.verify(token, expected, self.now())
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("windows", self.issuer.windows())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acadewave_core::ManualClock;
    use chrono::TimeZone;

    fn service() -> (TokenService, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 9, 1, 8, 0, 0).unwrap(),
        ));
        let service = TokenService::new(&JwtConfig::with_secret("service-secret"), clock.clone());
        (service, clock)
    }

    #[test]
    fn test_issue_and_verify_follow_the_clock() {
        let (service, clock) = service();
        let subject = AccountId::new();
        let token = service
            .issue_token(subject, TokenPurpose::PasswordReset)
            .unwrap();

        clock.advance(Duration::minutes(15));
        assert_eq!(
            service.verify_token(&token, TokenPurpose::PasswordReset),
            Ok(subject)
        );

        clock.advance(Duration::seconds(1));
        assert_eq!(
            service.verify_token(&token, TokenPurpose::PasswordReset),
            Err(VerifyError::Expired)
        );
    }

    #[test]
    fn test_window_reflects_config() {
        let mut config = JwtConfig::with_secret("k");
        config.access_token_expiry_minutes = 10;
        let service = TokenService::new(&config, Arc::new(acadewave_core::SystemClock));
        assert_eq!(service.window(TokenPurpose::Access), Duration::minutes(10));
    }

    #[test]
    fn test_services_with_different_secrets_reject_each_other() {
        let (service, _) = service();
        let other = TokenService::new(
            &JwtConfig::with_secret("rotated-secret"),
            Arc::new(acadewave_core::SystemClock),
        );
        let token = other
            .issue_token(AccountId::new(), TokenPurpose::Access)
            .unwrap();
        assert!(matches!(
            service.verify_token(&token, TokenPurpose::Access),
            Err(VerifyError::Invalid(_))
        ));
    }
}
