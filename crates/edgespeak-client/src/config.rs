//! Public configuration for the TTS server client.

use std::time::Duration;

use edgespeak_core::ClientSettings;

/// Configuration for [`HttpSynthesisBackend`](crate::HttpSynthesisBackend).
///
/// Use the builder pattern methods to customize the client configuration.
///
/// # Example
///
/// ```
/// use edgespeak_client::TtsClientConfig;
/// use std::time::Duration;
///
/// let config = TtsClientConfig::new()
///     .with_base_url("https://example.com/tts")
///     .with_timeout(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct TtsClientConfig {
    /// Base URL of the server, possibly with a path prefix
    pub(crate) base_url: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
    /// Maximum number of retry attempts for idempotent requests
    pub(crate) max_retries: u32,
    /// Base delay for exponential backoff
    pub(crate) retry_base_delay: Duration,
}

impl Default for TtsClientConfig {
    fn default() -> Self {
        Self {
            base_url: edgespeak_core::settings::DEFAULT_SERVER_URL.to_string(),
            user_agent: concat!("edgespeak/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(edgespeak_core::settings::DEFAULT_REQUEST_TIMEOUT_SECS),
            max_retries: edgespeak_core::settings::DEFAULT_MAX_RETRIES,
            retry_base_delay: Duration::from_millis(500),
        }
    }
}

impl TtsClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration matching validated client settings.
    #[must_use]
    pub fn from_settings(settings: &ClientSettings) -> Self {
        Self::new()
            .with_base_url(settings.server_url.trim())
            .with_timeout(Duration::from_secs(settings.request_timeout_secs))
            .with_max_retries(settings.max_retries)
    }

    /// Set the server base URL.
    ///
    /// Defaults to `http://127.0.0.1:9001`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 120 seconds; synthesis of long texts is slow.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retry attempts for idempotent requests.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the base delay for exponential backoff retries.
    ///
    /// Defaults to 500ms.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TtsClientConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:9001");
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert_eq!(config.max_retries, 2);
        assert!(config.user_agent.starts_with("edgespeak/"));
    }

    #[test]
    fn test_from_settings() {
        let settings = ClientSettings {
            server_url: " https://example.com/tts ".to_string(),
            request_timeout_secs: 30,
            max_retries: 0,
            ..ClientSettings::with_defaults()
        };
        let config = TtsClientConfig::from_settings(&settings);
        assert_eq!(config.base_url, "https://example.com/tts");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 0);
    }
}
