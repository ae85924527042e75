//! Retry policy for the `OpenAI`-compatible provider.

use std::time::Duration;

/// Default maximum number of retries for transient errors
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default base delay for exponential backoff (in milliseconds)
pub const DEFAULT_BASE_DELAY_MS: u64 = 1000;
/// Maximum delay cap (in milliseconds)
pub const MAX_DELAY_MS: u64 = 30_000;

/// Bounded exponential backoff with jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry, doubled for each subsequent one
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryConfig {
    /// Creates a retry config with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay_ms: DEFAULT_BASE_DELAY_MS,
        }
    }

    /// Sets the maximum number of retries.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the base delay for exponential backoff.
    #[must_use]
    pub const fn with_base_delay_ms(mut self, delay_ms: u64) -> Self {
        self.base_delay_ms = delay_ms;
        self
    }

    /// Delay before retry number `attempt` (0-based), capped at
    /// [`MAX_DELAY_MS`] plus up to 25% jitter.
    #[must_use]
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        let capped = self.base_delay_ms.saturating_mul(factor).min(MAX_DELAY_MS);
        let jitter = capped.saturating_mul(jitter_permille()) / 4000;
        Duration::from_millis(capped.saturating_add(jitter))
    }
}

/// Jitter in `[0, 1000)` taken from the clock's sub-second nanos.
fn jitter_permille() -> u64 {
    use std::time::SystemTime;
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map_or(0, |d| u64::from(d.subsec_nanos() % 1000))
}
