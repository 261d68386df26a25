use crate::middleware::role::{require_admin, require_student};
use crate::modules::dashboard::controller::{admin_dashboard, student_dashboard, teacher_dashboard};
use crate::state::AppState;
use axum::{Router, middleware, routing::get};

pub fn init_admin_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(admin_dashboard))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
}

/// Guarded by the `RequireTeacher` extractor in the handler itself.
pub fn init_teacher_router() -> Router<AppState> {
    Router::new().route("/dashboard", get(teacher_dashboard))
}

pub fn init_student_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(student_dashboard))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_student))
}
