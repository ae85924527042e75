//! REST API for the kernel.

pub mod game;

pub use game::ApiError;
pub use game::routes as game_routes;
pub use game::{StartGameRequest, StartGameResponse};
