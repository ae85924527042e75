//! WebSocket streaming of game events to browsers.

pub mod broadcaster;
pub mod connection;
pub mod handler;
pub mod types;

pub use broadcaster::{BroadcastReceiver, Broadcaster};
pub use handler::ws_router;
pub use types::{BroadcastMessage, ClientCommand, ClientId, DirectFrame, WsError};
