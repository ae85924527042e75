//! Handlers for the game endpoints.

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

use crate::api::game::types::{StartGameRequest, StartGameResponse};
use crate::game::{GameError, GameService, GameSnapshot};

/// API errors for game operations.
///
/// Starting and resetting always succeed, so the only failure a handler can
/// report is a refused state change.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The session cannot make the requested move from its current state.
    #[error("Game error: {0}")]
    InvalidTransition(GameError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.to_string(),
            "error_type": "invalid_transition",
        }));

        (StatusCode::CONFLICT, body).into_response()
    }
}

/// GET /api/v1/game
///
/// Current state of the session.
pub async fn get_game(State(service): State<Arc<GameService>>) -> Json<GameSnapshot> {
    Json(service.snapshot())
}

/// POST /api/v1/game
///
/// Starts a new game, superseding any running one. `202` with the epoch, or
/// `204` when the secret word is blank.
pub async fn start_game(
    State(service): State<Arc<GameService>>,
    Json(req): Json<StartGameRequest>,
) -> Response {
    match service.start_game(&req.secret_word) {
        Some(epoch) => (StatusCode::ACCEPTED, Json(StartGameResponse { epoch })).into_response(),
        None => {
            debug!("Blank secret word ignored");
            StatusCode::NO_CONTENT.into_response()
        }
    }
}

/// POST /api/v1/game/reset
pub async fn reset_game(State(service): State<Arc<GameService>>) -> Json<GameSnapshot> {
    Json(service.reset())
}

/// POST /api/v1/game/review
///
/// Reopens the conversation of a finished game; `409` outside `Result`.
pub async fn review_game(
    State(service): State<Arc<GameService>>,
) -> Result<Json<GameSnapshot>, ApiError> {
    service
        .review()
        .map(Json)
        .map_err(ApiError::InvalidTransition)
}
