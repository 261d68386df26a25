use acadewave::router::init_router;
use acadewave::state::init_app_state;
use acadewave_config::AppConfig;
use acadewave_observability::{init_metrics, init_tracing, metrics_app, shutdown_tracer};
use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    init_tracing()?;

    let config = AppConfig::from_env();
    let addr = config.server_addr.clone();

    let state = init_app_state(config).await?;
    let mut app = init_router(state);

    if let Some(handle) = init_metrics()? {
        app = app.merge(metrics_app(handle));
        info!("Prometheus metrics available at /metrics");
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(addr = %addr, "Server running");
    info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    shutdown_tracer().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutting down");
}
