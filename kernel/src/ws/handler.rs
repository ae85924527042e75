//! WebSocket upgrade handler.

use axum::{
    Router,
    extract::{State, ws::WebSocketUpgrade},
    response::Response,
    routing::get,
};
use std::sync::Arc;
use tracing::{error, info};

use crate::game::GameService;
use crate::ws::connection::Connection;

/// Upgrades the request and hands the socket to a [`Connection`].
pub async fn handle_ws_upgrade(
    ws: WebSocketUpgrade,
    State(service): State<Arc<GameService>>,
) -> Response {
    info!("WebSocket upgrade requested");
    ws.on_upgrade(move |socket| async move {
        let connection = Connection::new(socket, service);
        let client_id = connection.client_id();
        if let Err(e) = connection.run().await {
            error!(client_id = %client_id, error = %e, "WebSocket connection error");
        }
    })
}

/// Router serving `/ws`.
pub fn ws_router(service: Arc<GameService>) -> Router {
    Router::new()
        .route("/ws", get(handle_ws_upgrade))
        .with_state(service)
}
