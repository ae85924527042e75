//! Type definitions shared by inference providers.

pub mod error;
pub mod message;
pub mod request;
pub mod response;

pub use error::InferenceError;
pub use message::{Message, Role};
pub use request::ChatRequest;
pub use response::{ChatResponse, Usage};
