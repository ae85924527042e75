//! Mind Games kernel binary: loads settings, starts telemetry and serves the
//! game API and WebSocket until a shutdown signal arrives.

use anyhow::Context;
use mindgames_kernel::agents::LlmAgents;
use mindgames_kernel::game::{GameRules, GameService};
use mindgames_kernel::inference::OpenAIProvider;
use mindgames_kernel::infrastructure::{config::Settings, server, telemetry::TelemetryBuilder};
use mindgames_kernel::ws::{BroadcastMessage, Broadcaster};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Settings::new().context("Failed to load configuration")?;

    TelemetryBuilder::from_settings(&config.telemetry, env!("CARGO_PKG_VERSION"))
        .init()
        .context("Failed to initialize telemetry")?;
    let metrics = server::install_metrics()?;

    info!("Mind Games Kernel Starting...");

    if config.inference.api_key.is_none() {
        warn!("No inference API key configured, agent calls will be rejected");
    }
    let provider_config = config
        .inference
        .provider_config()
        .context("Invalid inference settings")?;
    let provider = Arc::new(OpenAIProvider::new(provider_config));
    let agents = Arc::new(LlmAgents::new(provider, config.inference.sampling()));

    let broadcaster = Broadcaster::new();
    let service = Arc::new(GameService::new(
        agents,
        GameRules::from(&config.game),
        broadcaster.clone(),
    ));
    info!(
        model = %config.inference.model,
        max_rounds = config.game.max_rounds,
        "Game service ready"
    );

    let app = server::router(service, Some(metrics));
    let shutdown = async move {
        shutdown_signal().await;
        info!("Shutdown signal received, cleaning up...");
        broadcaster.broadcast(BroadcastMessage::Shutdown);
    };
    if let Err(e) = server::run_server(&config, app, shutdown).await {
        error!("Control Plane failed: {:?}", e);
        return Err(e);
    }

    info!("Mind Games Kernel Shutdown Complete.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
