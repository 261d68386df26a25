//! Subscriber setup and per-request logging.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use opentelemetry::{KeyValue, global, trace::TraceError};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    propagation::TraceContextPropagator,
    runtime,
    trace::{self as sdktrace, RandomIdGenerator, Sampler, Tracer},
};
use opentelemetry_semantic_conventions::resource::{SERVICE_NAME, SERVICE_VERSION};
use tracing::{Instrument, Level, error, info, info_span, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::is_observability_enabled;

const LOG_DIR: &str = "storage/logs";
const DEFAULT_FILTER: &str = "acadewave=info,acadewave_db=info,tower_http=warn,hyper=info,tonic=info";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Wraps each request in a span carrying a fresh `request_id`, then logs the
/// outcome once. 4xx is logged at WARN and 5xx at ERROR.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    let span = info_span!(
        "http_request",
        request_id = %uuid::Uuid::new_v4(),
        method = %method,
        path = %path,
    );

    let response = next.run(req).instrument(span.clone()).await;

    let status = response.status().as_u16();
    let latency_ms = started.elapsed().as_millis() as u64;
    let level = level_for(status);
    span.in_scope(|| {
        if level == Level::ERROR {
            error!(status, latency_ms, "Request failed");
        } else if level == Level::WARN {
            warn!(status, latency_ms, "Request rejected");
        } else {
            info!(status, latency_ms, "Request completed");
        }
    });

    response
}

fn level_for(status: u16) -> Level {
    match status {
        500..=599 => Level::ERROR,
        400..=499 => Level::WARN,
        _ => Level::INFO,
    }
}

/// Builds the OTLP batch exporter. Fails when no collector pipeline can be
/// installed; the caller then runs without the OpenTelemetry layer.
fn otlp_tracer() -> Result<Tracer, TraceError> {
    let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .unwrap_or_else(|_| "http://localhost:4317".to_string());
    let environment =
        std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

    global::set_text_map_propagator(TraceContextPropagator::new());

    let trace_config = sdktrace::Config::default()
        .with_sampler(Sampler::AlwaysOn)
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(Resource::new([
            KeyValue::new(SERVICE_NAME, "acadewave"),
            KeyValue::new(SERVICE_VERSION, env!("CARGO_PKG_VERSION")),
            KeyValue::new("environment", environment),
        ]));

    opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(
            opentelemetry_otlp::new_exporter()
                .tonic()
                .with_endpoint(endpoint),
        )
        .with_trace_config(trace_config)
        .install_batch(runtime::Tokio)
}

fn console_layer() -> BoxedLayer {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(filter)
        .boxed()
}

/// Plain-text file holding errors only.
fn error_file_layer() -> BoxedLayer {
    fmt::layer()
        .with_writer(RollingFileAppender::new(Rotation::DAILY, LOG_DIR, "acadewave.log"))
        .with_target(false)
        .with_ansi(false)
        .with_filter(EnvFilter::new("error"))
        .boxed()
}

/// JSON lines for log shipping.
fn json_file_layer() -> BoxedLayer {
    fmt::layer()
        .json()
        .with_writer(RollingFileAppender::new(Rotation::DAILY, LOG_DIR, "acadewave.json"))
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::new("info"))
        .boxed()
}

/// Installs the global subscriber.
///
/// Falls back to console-only logging when `OBSERVABILITY_ENABLED=false`.
/// Log files roll daily under `storage/logs`.
pub fn init_tracing() -> anyhow::Result<()> {
    if !is_observability_enabled() {
        crate::basic_logging::init_basic_console_logging();
        return Ok(());
    }

    std::fs::create_dir_all(LOG_DIR)?;

    let mut layers = vec![console_layer(), error_file_layer(), json_file_layer()];
    let otlp = otlp_tracer();
    if let Ok(tracer) = &otlp {
        layers.push(
            tracing_opentelemetry::layer()
                .with_tracer(tracer.clone())
                .boxed(),
        );
    }

    tracing_subscriber::registry().with(layers).try_init()?;

    match otlp {
        Ok(_) => info!("Tracing initialized with OpenTelemetry and file logging"),
        Err(e) => warn!(error = %e, "OpenTelemetry unavailable, file logging only"),
    }

    Ok(())
}

/// Flushes pending spans to the collector.
pub async fn shutdown_tracer() {
    if !is_observability_enabled() {
        return;
    }
    info!("Shutting down OpenTelemetry tracer");
    global::shutdown_tracer_provider();
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::StatusCode, middleware, routing::get};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_logging_middleware_passes_response_through() {
        let app = Router::new()
            .route("/ok", get(|| async { "ok" }))
            .route(
                "/teapot",
                get(|| async { (StatusCode::IM_A_TEAPOT, "short and stout") }),
            )
            .layer(middleware::from_fn(logging_middleware));

        let ok = app
            .clone()
            .oneshot(Request::builder().uri("/ok").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);

        let teapot = app
            .oneshot(
                Request::builder()
                    .uri("/teapot")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(teapot.status(), StatusCode::IM_A_TEAPOT);
    }

    #[test]
    fn test_level_for_status_class() {
        assert_eq!(level_for(200), Level::INFO);
        assert_eq!(level_for(302), Level::INFO);
        assert_eq!(level_for(401), Level::WARN);
        assert_eq!(level_for(503), Level::ERROR);
    }
}
