//! Role-based authorization for Axum
//!
//! Two ways to guard a route:
//! 1. Layer-based: `require_admin`, `require_teacher` and `require_student`
//!    with `middleware::from_fn_with_state`
//! 2. Extractor-based: `RequireAdmin` and `RequireTeacher` in the handler
//!    signature
//!
//! Both go through the same authorization gate. The layer stores the
//! resolved [`Account`] in request extensions so `AuthUser` can reuse it.

use acadewave_models::{Account, Role};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::middleware::auth::{AuthUser, authorize, bearer_token};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub const ADMIN_ONLY: &[Role] = &[Role::Admin];
pub const STAFF: &[Role] = &[Role::Admin, Role::Teacher];
pub const ANY_ROLE: &[Role] = &[Role::Admin, Role::Teacher, Role::Student];

/// Middleware that admits the request only if the bearer's role is in
/// `allowed_roles`.
///
/// ```rust,ignore
/// let routes = Router::new()
///     .route("/reports", get(reports_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_teacher));
/// ```
pub async fn require_roles(
    state: &AppState,
    mut req: Request,
    next: Next,
    allowed_roles: &[Role],
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers())?;
    let account = authorize(state, token, allowed_roles).await?;

    req.extensions_mut().insert(account);
    Ok(next.run(req).await)
}

pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    require_roles(&state, req, next, ADMIN_ONLY)
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

/// Admins and teachers.
pub async fn require_teacher(State(state): State<AppState>, req: Request, next: Next) -> Response {
    require_roles(&state, req, next, STAFF)
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

/// Any authenticated account.
pub async fn require_student(State(state): State<AppState>, req: Request, next: Next) -> Response {
    require_roles(&state, req, next, ANY_ROLE)
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

async fn extract_with_roles(
    parts: &mut Parts,
    state: &AppState,
    allowed_roles: &[Role],
) -> Result<Account, AppError> {
    let token = bearer_token(&parts.headers)?;
    authorize(state, token, allowed_roles).await
}

/// Extractor for admin-only handlers.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub Account);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        extract_with_roles(parts, state, ADMIN_ONLY)
            .await
            .map(RequireAdmin)
    }
}

/// Extractor for admin or teacher handlers.
#[derive(Debug, Clone)]
pub struct RequireTeacher(pub Account);

impl FromRequestParts<AppState> for RequireTeacher {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        extract_with_roles(parts, state, STAFF)
            .await
            .map(RequireTeacher)
    }
}

/// Role check inside handler logic, for routes that branch on role.
///
/// ```rust,ignore
/// pub async fn handler(auth_user: AuthUser) -> Result<Json<Response>, AppError> {
///     check_any_role(&auth_user, STAFF)?;
/// }
/// ```
pub fn check_any_role(auth_user: &AuthUser, allowed_roles: &[Role]) -> Result<(), AppError> {
    acadewave_auth::check_role(&auth_user.0, allowed_roles).map_err(AppError::from)
}
