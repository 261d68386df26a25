use acadewave_auth::AuthError;
use acadewave_models::{Account, AccountId, Role};
use acadewave_observability as observability;
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use tracing::warn;

use crate::state::AppState;
use crate::utils::errors::AppError;

/// Extractor that authenticates the bearer token and yields the stored
/// account. Accepts any role.
///
/// If a role layer has already authorized the request, the account it
/// resolved is reused instead of hitting the directory again.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Account);

impl AuthUser {
    pub fn id(&self) -> AccountId {
        self.0.id
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.0.role == role
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.0.role)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(account) = parts.extensions.get::<Account>() {
            return Ok(AuthUser(account.clone()));
        }

        let token = bearer_token(&parts.headers)?;
        let account = authorize(state, token, &Role::ALL).await?;

        Ok(AuthUser(account))
    }
}

/// Pulls the token out of `Authorization: Bearer <token>`. The scheme is
/// matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Ok(token.trim())
        }
        _ => Err(AppError::unauthorized("Invalid authorization header format")),
    }
}

/// Runs the authorization gate and records denials.
pub(crate) async fn authorize(
    state: &AppState,
    token: &str,
    required_roles: &[Role],
) -> Result<Account, AppError> {
    state
        .gate
        .authorize(token, required_roles)
        .await
        .map_err(|err| {
            let reason = err.reason();
            match &err {
                AuthError::Token(_) => observability::track_token_rejected(reason),
                AuthError::Directory(_) => {}
                _ => observability::track_access_denied(reason),
            }
            if let AuthError::Forbidden { role, .. } = &err {
                warn!(reason, role = %role, "Access denied");
            } else {
                warn!(reason, "Authentication failed");
            }
            AppError::from(err)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extracts_token() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
        assert_eq!(bearer_token(&headers("bearer abc")).unwrap(), "abc");
    }

    #[test]
    fn test_bearer_token_rejects_other_schemes() {
        let err = bearer_token(&headers("Basic dXNlcjpwYXNz")).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);

        assert!(bearer_token(&headers("Bearer ")).is_err());
        assert!(bearer_token(&headers("abc.def.ghi")).is_err());
    }

    #[test]
    fn test_bearer_token_missing_header() {
        let err = bearer_token(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.error.to_string(), "Missing authorization header");
    }
}
