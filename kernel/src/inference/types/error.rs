//! Error types for inference operations.

/// Errors that can occur while talking to a language-model provider.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InferenceError {
    /// Error reported by the provider
    #[error("Provider Error: {0}")]
    ProviderError(String),
    /// Rate limit exceeded
    #[error("Rate Limit Exceeded")]
    RateLimit,
    /// The API key was missing, invalid or lacks access to the model
    #[error("Authentication Failed: {0}")]
    Authentication(String),
    /// The account has run out of credits for this request
    #[error("Payment Required: {0}")]
    PaymentRequired(String),
    /// Prompt exceeded the model's context window
    #[error("Context Length Exceeded")]
    ContextLengthExceeded,
    /// The gateway or upstream model is temporarily down (HTTP 500, 502, 503, 504)
    #[error("Server Error: {0}")]
    ServerError(String),
    /// Transport failure before a response arrived
    #[error("Network Error: {0}")]
    NetworkError(String),
    /// Configuration error
    #[error("Configuration Error: {0}")]
    ConfigError(String),
}

impl InferenceError {
    /// Returns `true` if this error is transient and retry may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimit | Self::ServerError(_) | Self::NetworkError(_) => true,
            Self::ProviderError(_)
            | Self::Authentication(_)
            | Self::PaymentRequired(_)
            | Self::ContextLengthExceeded
            | Self::ConfigError(_) => false,
        }
    }
}
