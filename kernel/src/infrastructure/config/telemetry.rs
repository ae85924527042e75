//! Logging and trace export settings.

use serde::Deserialize;

/// Telemetry configuration settings.
#[derive(Debug, Deserialize, Clone)]
pub struct TelemetrySettings {
    /// Service name reported to the trace backend.
    pub service_name: String,
    /// OTLP endpoint for traces; export is off when unset.
    pub otlp_endpoint: Option<String>,
    /// Sampling ratio for traces.
    #[serde(default = "default_sampling")]
    pub sampling_ratio: f64,
    /// Default filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

pub(super) fn default_sampling() -> f64 {
    1.0
}

fn default_log_level() -> String {
    "info".to_string()
}
