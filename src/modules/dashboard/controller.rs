//! Role-scoped landing endpoints. Each one only answers to the roles its
//! guard admits.

use acadewave_models::AccountResponse;
use axum::Json;
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireTeacher;
use crate::modules::auth::controller::ErrorResponse;
use crate::utils::errors::AppError;

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub message: String,
    pub account: AccountResponse,
}

/// Admin dashboard
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "Admin dashboard", body = DashboardResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin role required", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboards"
)]
#[instrument(skip_all, fields(account_id = %auth_user.id()))]
pub async fn admin_dashboard(auth_user: AuthUser) -> Result<Json<DashboardResponse>, AppError> {
    Ok(Json(DashboardResponse {
        message: format!("Welcome to the admin dashboard, {}", auth_user.0.username),
        account: auth_user.0.into(),
    }))
}

/// Teacher dashboard (admins included)
#[utoipa::path(
    get,
    path = "/api/teacher/dashboard",
    responses(
        (status = 200, description = "Teacher dashboard", body = DashboardResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Forbidden - teacher or admin role required", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboards"
)]
#[instrument(skip_all, fields(account_id = %teacher.id))]
pub async fn teacher_dashboard(
    RequireTeacher(teacher): RequireTeacher,
) -> Result<Json<DashboardResponse>, AppError> {
    Ok(Json(DashboardResponse {
        message: format!("Welcome to the teacher dashboard, {}", teacher.username),
        account: teacher.into(),
    }))
}

/// Student dashboard, open to every authenticated role
#[utoipa::path(
    get,
    path = "/api/student/dashboard",
    responses(
        (status = 200, description = "Student dashboard", body = DashboardResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboards"
)]
#[instrument(skip_all, fields(account_id = %auth_user.id()))]
pub async fn student_dashboard(auth_user: AuthUser) -> Result<Json<DashboardResponse>, AppError> {
    Ok(Json(DashboardResponse {
        message: format!("Welcome to the student dashboard, {}", auth_user.0.username),
        account: auth_user.0.into(),
    }))
}
