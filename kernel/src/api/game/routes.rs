//! Routes of the game API.

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::api::game::handlers::{get_game, reset_game, review_game, start_game};
use crate::game::GameService;

/// Game endpoints mounted at `/api/v1/game`.
pub fn routes() -> Router<Arc<GameService>> {
    Router::new()
        .route("/api/v1/game", get(get_game).post(start_game))
        .route("/api/v1/game/reset", post(reset_game))
        .route("/api/v1/game/review", post(review_game))
}
