//! Request/response bodies of the game API.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/game`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StartGameRequest {
    /// Word the helpers describe; blank input is ignored.
    pub secret_word: String,
}

/// Reply to an accepted start.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StartGameResponse {
    /// Epoch of the game that was started.
    pub epoch: u64,
}
