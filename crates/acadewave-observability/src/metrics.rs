use std::time::{Duration, Instant};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

use crate::is_observability_enabled;

/// Installs the Prometheus recorder and its upkeep task.
///
/// Returns `None` when observability is switched off at runtime.
pub fn init_metrics() -> anyhow::Result<Option<PrometheusHandle>> {
    if !is_observability_enabled() {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[
                0.001, 0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0,
            ],
        )?
        .install_recorder()?;

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Ok(Some(handle))
}

fn status_category(status: u16) -> &'static str {
    match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16();

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(latency);
    counter!("http_requests_by_status", "status_category" => status_category(status))
        .increment(1);

    gauge!("http_requests_active").decrement(1.0);

    response
}

/// Router serving the Prometheus scrape endpoint.
pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

// Auth metrics

pub fn track_token_issued(purpose: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("auth_tokens_issued_total", "purpose" => purpose.to_string()).increment(1);
}

pub fn track_token_rejected(reason: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("auth_token_rejections_total", "reason" => reason.to_string()).increment(1);
}

pub fn track_access_denied(reason: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("auth_access_denied_total", "reason" => reason.to_string()).increment(1);
}

pub fn track_account_registered(role: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("accounts_registered_total", "role" => role.to_string()).increment(1);
}

pub fn track_email_verified() {
    if !is_observability_enabled() {
        return;
    }
    counter!("accounts_verified_total").increment(1);
}

pub fn track_login_success(role: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("user_logins_total", "role" => role.to_string(), "status" => "success").increment(1);
}

pub fn track_login_failure(reason: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!(
        "user_logins_total",
        "role" => "unknown",
        "status" => "failure",
        "reason" => reason.to_string()
    )
    .increment(1);
}

pub fn track_password_reset() {
    if !is_observability_enabled() {
        return;
    }
    counter!("password_resets_total").increment(1);
}
