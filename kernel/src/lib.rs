//! Mind Games Kernel - orchestration server for a multi-agent word-guessing
//! game.
//!
//! Two helper agents give one-word clues about a secret word in rounds of
//! increasing specificity while a third agent, the Oracle, tries to guess it.
//! The kernel sequences the agent calls, keeps the shared history, decides
//! when the game ends and publishes every step to connected browsers.

#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Agent capability seam and its language-model implementation.
pub mod agents;
/// REST API for driving the game.
pub mod api;
/// Game state, round loop and session service.
pub mod game;
/// LLM inference provider.
pub mod inference;
/// Infrastructure components (config, server, telemetry).
pub mod infrastructure;
/// WebSocket broadcaster for real-time updates.
pub mod ws;
