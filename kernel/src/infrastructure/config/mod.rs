//! Configuration management for the kernel.
//!
//! Settings are layered from built-in defaults and `MINDGAMES__`-prefixed
//! environment variables, e.g. `MINDGAMES__INFERENCE__API_KEY` or
//! `MINDGAMES__GAME__MAX_ROUNDS`.
//!
//! # Example
//!
//! ```no_run
//! use mindgames_kernel::infrastructure::config::Settings;
//!
//! let settings = Settings::new().expect("Failed to load configuration");
//! assert!(settings.game.max_rounds <= 10);
//! ```

pub mod game;
pub mod inference;
pub mod server;
pub mod telemetry;

pub use game::GameSettings;
pub use inference::InferenceSettings;
pub use server::ServerSettings;
pub use telemetry::TelemetrySettings;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment};
use serde::Deserialize;

use crate::game::MAX_ROUNDS;

/// Top-level configuration for the kernel.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Server settings.
    pub server: ServerSettings,
    /// Telemetry settings.
    pub telemetry: TelemetrySettings,
    /// Inference provider settings.
    pub inference: InferenceSettings,
    /// Game loop settings.
    pub game: GameSettings,
}

impl Settings {
    /// Creates a new settings instance from environment variables and defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be built, deserialized
    /// or fails validation.
    pub fn new() -> Result<Self, ConfigError> {
        let builder =
            Self::defaults()?.add_source(Environment::with_prefix("MINDGAMES").separator("__"));
        Self::from_builder(builder)
    }

    /// Builder pre-loaded with every default.
    ///
    /// # Errors
    ///
    /// Returns an error if a default cannot be set.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 9090)?
            .set_default("telemetry.service_name", "mindgames-kernel")?
            .set_default("telemetry.sampling_ratio", 1.0)?
            .set_default("telemetry.log_level", "info")?
            .set_default("inference.base_url", "https://openrouter.ai/api/v1/")?
            .set_default("inference.model", "openai/gpt-4o-2024-05-13")?
            .set_default("inference.max_tokens", 1000)?
            .set_default("inference.temperature", 0.5)?
            .set_default("inference.max_retries", 3)?
            .set_default("inference.base_delay_ms", 1000)?
            .set_default("game.max_rounds", 10)?
            .set_default("game.turn_delay_ms", 800)?
            .set_default("game.round_delay_ms", 1500)?
            .set_default("game.call_timeout_ms", 60_000)
    }

    /// Builds, deserializes and validates settings from `builder`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be built, deserialized
    /// or fails validation.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Self = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks value ranges serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Message` naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_ROUNDS).contains(&self.game.max_rounds) {
            return Err(ConfigError::Message(format!(
                "game.max_rounds must be between 1 and {MAX_ROUNDS}, got {}",
                self.game.max_rounds
            )));
        }
        if self.game.call_timeout_ms == 0 {
            return Err(ConfigError::Message(
                "game.call_timeout_ms must be positive".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.inference.temperature) {
            return Err(ConfigError::Message(format!(
                "inference.temperature must be between 0 and 2, got {}",
                self.inference.temperature
            )));
        }
        if !(0.0..=1.0).contains(&self.telemetry.sampling_ratio) {
            return Err(ConfigError::Message(format!(
                "telemetry.sampling_ratio must be between 0 and 1, got {}",
                self.telemetry.sampling_ratio
            )));
        }
        Ok(())
    }
}

/// Helper for strong typing addresses
pub struct BindAddress(pub String, pub u16);

impl BindAddress {
    /// Converts the bind address to a `SocketAddr`.
    ///
    /// # Errors
    ///
    /// Returns an error if the IP address string cannot be parsed.
    pub fn to_socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        let ip = self
            .0
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid IP address '{}': {e}", self.0))?;
        Ok(std::net::SocketAddr::new(ip, self.1))
    }
}

impl From<&ServerSettings> for BindAddress {
    fn from(server: &ServerSettings) -> Self {
        Self(server.host.clone(), server.port)
    }
}
