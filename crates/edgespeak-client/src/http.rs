//! HTTP backend abstraction for the TTS server API.
//!
//! The production implementation uses reqwest with automatic retry for
//! transient errors on idempotent requests. Synthesis POSTs are sent
//! exactly once: an issued synthesis is never duplicated.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::TtsClientConfig;
use crate::error::{ClientError, ClientResult, error_message_from_body};

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that can talk JSON and bytes.
///
/// This is an implementation detail - external code should use the
/// `SynthesisBackend` port.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// GET a URL and deserialize the JSON body.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> ClientResult<T>;

    /// GET a URL and return the raw body.
    async fn get_bytes(&self, url: &Url) -> ClientResult<Vec<u8>>;

    /// POST a JSON body once and deserialize the JSON answer.
    async fn post_json<B, T>(&self, url: &Url, body: &B) -> ClientResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest with retry logic.
///
/// Implements exponential backoff for transient server errors (5xx)
/// and network errors on GET requests.
pub struct ReqwestBackend {
    client: reqwest::Client,
    max_retries: u32,
    retry_base_delay: Duration,
}

impl ReqwestBackend {
    pub fn new(config: &TtsClientConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            retry_base_delay: config.retry_base_delay,
        })
    }

    /// Fetch a URL with automatic retry for transient errors.
    async fn get_with_retry(&self, url: &Url) -> ClientResult<reqwest::Response> {
        let mut last_error: Option<ClientError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = backoff_delay(self.retry_base_delay, attempt);
                debug!(%url, attempt, ?delay, "Retrying request");
                tokio::time::sleep(delay).await;
            }

            match self.client.get(url.as_str()).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }

                    let error = status_error(status, url, response).await;

                    // 5xx errors are retryable (server-side issues)
                    if status.is_server_error() && attempt < self.max_retries {
                        last_error = Some(error);
                        continue;
                    }
                    return Err(error);
                }
                Err(e) => {
                    // Network errors are retryable
                    if attempt < self.max_retries && !e.is_builder() {
                        last_error = Some(e.into());
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }

        Err(last_error.unwrap_or_else(|| ClientError::InvalidResponse {
            message: "Unknown error during fetch".to_string(),
        }))
    }
}

/// Delay before retry number `attempt` (1-based): `base * 2^(attempt-1)`.
pub(crate) fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
}

/// Turn an error response into a [`ClientError`], using the server's
/// `{"error": ...}` message when it sent one.
async fn status_error(status: StatusCode, url: &Url, response: reqwest::Response) -> ClientError {
    let body = response.text().await.unwrap_or_default();
    classify_status(status, url, &body)
}

pub(crate) fn classify_status(status: StatusCode, url: &Url, body: &str) -> ClientError {
    let message = error_message_from_body(body);
    if status == StatusCode::NOT_FOUND
        && message
            .as_deref()
            .is_none_or(|m| m.to_lowercase().contains("not found"))
    {
        return ClientError::NotFound {
            url: url.to_string(),
        };
    }
    ClientError::ApiRequestFailed {
        status: status.as_u16(),
        message: message.unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        }),
        url: url.to_string(),
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> ClientResult<T> {
        let response = self.get_with_retry(url).await?;
        let data: T = response.json().await?;
        Ok(data)
    }

    async fn get_bytes(&self, url: &Url) -> ClientResult<Vec<u8>> {
        let response = self.get_with_retry(url).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn post_json<B, T>(&self, url: &Url, body: &B) -> ClientResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let response = self.client.post(url.as_str()).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, url, response).await);
        }
        let data: T = response.json().await?;
        Ok(data)
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
