use crate::api::game_routes;
use crate::game::GameService;
use crate::infrastructure::config::{BindAddress, Settings};
use crate::ws::ws_router;
use anyhow::Context;
use axum::{Router, routing::get};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::future::Future;
use std::sync::Arc;

async fn health_check() -> &'static str {
    "OK"
}

/// Installs the global Prometheus recorder.
///
/// # Errors
///
/// Returns an error if a recorder is already installed.
pub fn install_metrics() -> anyhow::Result<PrometheusHandle> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {e}"))
}

/// Probes, metrics, the game API and the WebSocket on one router.
pub fn router(service: Arc<GameService>, metrics: Option<PrometheusHandle>) -> Router {
    let mut control_plane = Router::new()
        .route("/health/live", get(health_check))
        .route("/health/ready", get(health_check));
    if let Some(handle) = metrics {
        control_plane =
            control_plane.route("/metrics", get(move || std::future::ready(handle.render())));
    }

    control_plane
        .merge(game_routes().with_state(Arc::clone(&service)))
        .merge(ws_router(service))
}

/// Serves `app` until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the address is invalid, the port cannot be bound or
/// the server fails while running.
pub async fn run_server(
    config: &Settings,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let addr = BindAddress::from(&config.server).to_socket_addr()?;

    tracing::info!("Control Plane listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
