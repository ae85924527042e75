//! REST endpoints for driving the single game session.

pub mod handlers;
pub mod routes;
pub mod types;

pub use handlers::ApiError;
pub use routes::routes;
pub use types::{StartGameRequest, StartGameResponse};
