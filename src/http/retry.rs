//! Retry policies for HTTP requests.

use std::time::Duration;

/// Retry policy for a logical API call.
#[derive(Debug, Clone)]
pub enum RetryPolicy {
    /// No retries.
    None,
    /// Retry transient server statuses (502/503/504) and transport-level
    /// connect/timeout failures. The default for every verb — the policy
    /// is status-driven, not verb-driven, so POST and PATCH retry the
    /// same way GET does.
    Transient,
    /// User-provided retry logic.
    Custom(RetryConfig),
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::Transient
    }
}

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retries (not counting the initial request).
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each retry.
    pub backoff_factor: f64,
    /// Whether to add jitter to the delay.
    pub jitter: bool,
    /// HTTP status codes that trigger a retry.
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::transient()
    }
}

impl RetryConfig {
    /// The transient-error config: five retries, one second doubling.
    pub fn transient() -> Self {
        Self {
            max_retries: 5,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            backoff_factor: 2.0,
            jitter: false,
            retryable_statuses: vec![502, 503, 504],
        }
    }

    /// Calculate delay for a given attempt (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base =
            self.initial_delay.as_millis() as f64 * self.backoff_factor.powi(attempt as i32);
        let capped = base.min(self.max_delay.as_millis() as f64);

        let final_ms = if self.jitter {
            let jitter_range = capped * 0.25;
            let jitter = (rand::random::<f64>() - 0.5) * 2.0 * jitter_range;
            (capped + jitter).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(final_ms as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_policy_defaults_to_transient() {
        assert!(matches!(RetryPolicy::default(), RetryPolicy::Transient));
    }

    #[test]
    fn test_transient_config_statuses() {
        let config = RetryConfig::transient();
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.retryable_statuses, vec![502, 503, 504]);
        assert!(!config.retryable_statuses.contains(&404));
    }

    #[test]
    fn test_delay_doubles_from_one_second() {
        let config = RetryConfig::transient();
        assert_eq!(config.delay_for_attempt(0).as_millis(), 1000);
        assert_eq!(config.delay_for_attempt(1).as_millis(), 2000);
        assert_eq!(config.delay_for_attempt(2).as_millis(), 4000);
        assert_eq!(config.delay_for_attempt(3).as_millis(), 8000);
    }

    #[test]
    fn test_delay_caps_at_max() {
        let config = RetryConfig {
            max_retries: 5,
            initial_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(2000),
            backoff_factor: 10.0,
            jitter: false,
            retryable_statuses: vec![],
        };
        assert_eq!(config.delay_for_attempt(3).as_millis(), 2000);
    }
}
