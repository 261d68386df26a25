//! JSON extractor that runs `validator` rules before the handler sees the
//! body.
//!
//! Malformed bodies are rejected with 400; bodies that parse but break a
//! field rule are rejected with 422 and a comma-separated list of messages.

use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::utils::errors::AppError;

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        value.validate().map_err(|errors| {
            AppError::unprocessable(format_errors(&errors))
        })?;

        Ok(ValidatedJson(value))
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::bad_request("Missing 'Content-Type: application/json' header");
    }

    let body = rejection.body_text();
    if let Some(field) = missing_field(&body) {
        return AppError::bad_request(format!("{} is required", field));
    }
    if body.contains("invalid type") {
        return AppError::bad_request("Invalid field type in request");
    }

    AppError::new(StatusCode::BAD_REQUEST, anyhow!("Invalid request body"))
}

/// Picks the field name out of serde's "missing field `name`" message.
fn missing_field(message: &str) -> Option<&str> {
    message
        .split("missing field `")
        .nth(1)
        .and_then(|rest| rest.split('`').next())
}

fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    // field_errors() is a HashMap; keep the output stable
    messages.sort();
    messages.join(", ")
}
