use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use acadewave_models::{
    AccountResponse, ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse,
    RegisterRequest, RequestVerificationRequest, ResetPasswordRequest, Role, UpdateAccountRequest,
    VerifyEmailRequest,
};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::dashboard::controller::DashboardResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::verify_email,
        crate::modules::auth::controller::request_verification,
        crate::modules::auth::controller::forgot_password,
        crate::modules::auth::controller::reset_password,
        crate::modules::users::controller::get_me,
        crate::modules::users::controller::update_me,
        crate::modules::dashboard::controller::admin_dashboard,
        crate::modules::dashboard::controller::teacher_dashboard,
        crate::modules::dashboard::controller::student_dashboard,
    ),
    components(
        schemas(
            Role,
            AccountResponse,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            VerifyEmailRequest,
            RequestVerificationRequest,
            ForgotPasswordRequest,
            ResetPasswordRequest,
            UpdateAccountRequest,
            MessageResponse,
            DashboardResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login, email verification and password reset"),
        (name = "Users", description = "Current account and self-service profile changes"),
        (name = "Dashboards", description = "Role-scoped landing endpoints")
    ),
    info(
        title = "Acadewave API",
        version = "0.1.0",
        description = "Account lifecycle and role-based access for the Acadewave platform, built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/auth/register",
            "/api/auth/login",
            "/api/auth/verify-email",
            "/api/auth/request-verification",
            "/api/auth/forgot-password",
            "/api/auth/reset-password",
            "/api/users/me",
            "/api/admin/dashboard",
            "/api/teacher/dashboard",
            "/api/student/dashboard",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "missing {expected}");
        }
    }

    #[test]
    fn test_openapi_documents_profile_update() {
        let doc = ApiDoc::openapi();
        let me = doc.paths.paths.get("/api/users/me").expect("users/me path");
        assert!(me.get.is_some());
        assert!(me.patch.is_some());
    }

    #[test]
    fn test_openapi_declares_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
