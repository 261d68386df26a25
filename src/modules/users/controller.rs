use acadewave_models::{AccountResponse, UpdateAccountRequest};
use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Get the account behind the bearer token
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current account", body = AccountResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip_all, fields(account_id = %auth_user.id()))]
pub async fn get_me(auth_user: AuthUser) -> Result<Json<AccountResponse>, AppError> {
    Ok(Json(auth_user.0.into()))
}

/// Change the username and/or password of the account behind the bearer token
#[utoipa::path(
    patch,
    path = "/api/users/me",
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Account updated", body = AccountResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 409, description = "Username already taken", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip_all, fields(account_id = %auth_user.id()))]
pub async fn update_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateAccountRequest>,
) -> Result<Json<AccountResponse>, AppError> {
    let account = state.auth.update_profile(&auth_user.0, dto).await?;
    Ok(Json(account.into()))
}
