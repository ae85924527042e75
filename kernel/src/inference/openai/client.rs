//! HTTP client for `OpenAI`-compatible chat completion endpoints.

use crate::inference::openai::mapping::{
    OpenAIChatRequest, OpenAIChatResponse, create_request, map_response,
};
use crate::inference::openai::retry::RetryConfig;
use crate::inference::provider::LLMProvider;
use crate::inference::types::{ChatRequest, ChatResponse, InferenceError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

/// Configuration for the `OpenAI` provider
pub struct OpenAIConfig {
    /// Bearer token sent with every request
    pub api_key: SecretString,
    /// Base URL, including the trailing slash (e.g. `https://openrouter.ai/api/v1/`)
    pub base_url: Url,
    /// Retry policy for rate limits and transient errors
    pub retry: RetryConfig,
}

impl OpenAIConfig {
    /// Creates a new config with default retry settings
    #[must_use]
    pub fn new(api_key: SecretString, base_url: Url) -> Self {
        Self {
            api_key,
            base_url,
            retry: RetryConfig::default(),
        }
    }

    /// Sets the maximum number of retries
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.retry = self.retry.with_max_retries(max_retries);
        self
    }

    /// Sets the base delay for exponential backoff
    #[must_use]
    pub fn with_base_delay_ms(mut self, delay_ms: u64) -> Self {
        self.retry = self.retry.with_base_delay_ms(delay_ms);
        self
    }
}

/// Provider for `OpenAI` and `OpenAI`-compatible gateways such as `OpenRouter`.
pub struct OpenAIProvider {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIProvider {
    /// Creates a new provider with the given configuration.
    #[must_use]
    pub fn new(config: OpenAIConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Returns the retry policy in effect.
    #[must_use]
    pub fn retry_config(&self) -> RetryConfig {
        self.config.retry
    }

    async fn make_request(
        &self,
        provider_req: &OpenAIChatRequest,
    ) -> Result<ChatResponse, InferenceError> {
        let res = self
            .build_api_request(provider_req)?
            .send()
            .await
            .map_err(|e| InferenceError::NetworkError(e.to_string()))?;

        Self::map_api_response(res).await
    }

    fn build_api_request(
        &self,
        provider_req: &OpenAIChatRequest,
    ) -> Result<reqwest::RequestBuilder, InferenceError> {
        let url = self
            .config
            .base_url
            .join("chat/completions")
            .map_err(|e| InferenceError::ConfigError(format!("Invalid URL join: {e}")))?;

        Ok(self
            .client
            .post(url)
            .header(
                "Authorization",
                format!("Bearer {}", self.config.api_key.expose_secret()),
            )
            .header("Content-Type", "application/json")
            .json(provider_req))
    }

    async fn map_api_response(res: reqwest::Response) -> Result<ChatResponse, InferenceError> {
        let status = res.status();
        if status == StatusCode::OK {
            let body: OpenAIChatResponse = res
                .json()
                .await
                .map_err(|e| InferenceError::ProviderError(format!("Parse error: {e}")))?;
            return map_response(body).map_err(InferenceError::ProviderError);
        }

        let text = res.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::TOO_MANY_REQUESTS => InferenceError::RateLimit,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                InferenceError::Authentication(format!("HTTP {status}: {text}"))
            }
            StatusCode::PAYMENT_REQUIRED => InferenceError::PaymentRequired(text),
            StatusCode::BAD_REQUEST if text.contains("context_length_exceeded") => {
                InferenceError::ContextLengthExceeded
            }
            StatusCode::BAD_REQUEST => InferenceError::ProviderError(format!("Bad Request: {text}")),
            StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT => InferenceError::ServerError(format!("HTTP {status}: {text}")),
            _ => InferenceError::ProviderError(format!("HTTP {status}: {text}")),
        })
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, InferenceError> {
        let provider_req = create_request(request);
        let retry = self.config.retry;

        let mut attempt = 0;
        loop {
            match self.make_request(&provider_req).await {
                Ok(response) => {
                    debug!(
                        model = %provider_req.model,
                        attempts = attempt + 1,
                        total_tokens = ?response.total_tokens(),
                        "Chat completion succeeded"
                    );
                    return Ok(response);
                }
                Err(error) => {
                    if !error.is_retryable() || attempt >= retry.max_retries {
                        debug!(attempts = attempt + 1, error = %error, "Giving up on chat completion");
                        return Err(error);
                    }

                    let delay = retry.backoff_delay(attempt);
                    let delay_ms: u64 = delay.as_millis().try_into().unwrap_or(u64::MAX);
                    warn!(
                        attempt = attempt + 1,
                        max_retries = retry.max_retries,
                        delay_ms,
                        error = %error,
                        "Chat completion failed, retrying after backoff"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
