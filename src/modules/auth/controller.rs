use acadewave_models::{
    AccountResponse, ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse,
    RegisterRequest, RequestVerificationRequest, ResetPasswordRequest, VerifyEmailRequest,
};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;
use utoipa::ToSchema;

use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Register a new student account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created; verification email sent", body = AccountResponse),
        (status = 409, description = "Email or username already taken", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), AppError> {
    let account = state.auth.register(dto).await?;
    Ok((StatusCode::CREATED, Json(account.into())))
}

/// Log in with email or username
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 403, description = "Email not verified", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = state.auth.login(&dto.identity, &dto.password).await?;
    Ok(Json(response))
}

/// Activate an account with an email verification token
#[utoipa::path(
    post,
    path = "/api/auth/verify-email",
    request_body = VerifyEmailRequest,
    responses(
        (status = 200, description = "Account activated", body = AccountResponse),
        (status = 400, description = "Invalid or expired token, or already verified", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn verify_email(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<VerifyEmailRequest>,
) -> Result<Json<AccountResponse>, AppError> {
    let account = state.auth.verify_email(&dto.token).await?;
    Ok(Json(account.into()))
}

/// Request a new verification email
#[utoipa::path(
    post,
    path = "/api/auth/request-verification",
    request_body = RequestVerificationRequest,
    responses(
        (status = 202, description = "Verification email sent if the account exists and is unverified", body = MessageResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn request_verification(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RequestVerificationRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    state.auth.request_verification(&dto.identity).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse::new(
            "If an unverified account exists, a verification link has been sent.",
        )),
    ))
}

/// Request password reset email
#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Password reset email sent if account exists", body = MessageResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    state.auth.forgot_password(&dto.identity).await?;
    Ok(Json(MessageResponse::new(
        "If an account exists, a password reset link has been sent.",
    )))
}

/// Reset password using token
#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset", body = MessageResponse),
        (status = 400, description = "Invalid or expired token", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .auth
        .reset_password(&dto.token, &dto.new_password)
        .await?;
    Ok(Json(MessageResponse::new(
        "Password has been reset successfully",
    )))
}
