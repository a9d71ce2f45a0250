//! tonapi HTTP Client - Rate-limited REST Client with Retries
//!
//! Wraps reqwest with a request-rate limiter and bounded retries for all
//! tonapi calls. Transport errors, 5xx and 429 responses are retried with
//! exponential backoff; any other non-2xx status fails immediately.

use std::num::NonZeroU32;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tracing::{debug, warn};

use super::types::ErrorBody;
use crate::config::NetworkConfig;

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Upper bound on a single retry pause.
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Pause before retry number `attempt` (1-based): `base * 2^(attempt-1)`, capped.
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
    base.saturating_mul(factor).min(MAX_RETRY_DELAY)
}

/// Configuration for the tonapi client.
#[derive(Debug, Clone)]
pub struct TonapiClientConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub requests_per_second: u32,
    /// Attempts per request, including the first.
    pub max_attempts: u32,
    /// Base delay between retries (exponential backoff).
    pub retry_base_delay: Duration,
}

impl Default for TonapiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://tonapi.io".to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
            requests_per_second: 1,
            max_attempts: 3,
            retry_base_delay: Duration::from_millis(500),
        }
    }
}

impl From<&NetworkConfig> for TonapiClientConfig {
    fn from(network: &NetworkConfig) -> Self {
        Self {
            base_url: network.tonapi_url.trim_end_matches('/').to_string(),
            api_key: network.tonapi_key.clone(),
            timeout: Duration::from_secs(network.timeout_seconds),
            requests_per_second: network.rate_limit_rps,
            max_attempts: network.max_attempts,
            ..Self::default()
        }
    }
}

/// Rate-limited HTTP client for the tonapi REST API.
pub struct TonapiClient {
    http: Client,
    config: TonapiClientConfig,
    limiter: DirectLimiter,
}

impl TonapiClient {
    /// Create a new tonapi client.
    pub fn new(config: TonapiClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(5)
            .build()
            .context("Failed to build HTTP client")?;

        let rps = NonZeroU32::new(config.requests_per_second)
            .context("requests_per_second must be positive")?;
        let limiter = RateLimiter::direct(Quota::per_second(rps));

        Ok(Self {
            http,
            config,
            limiter,
        })
    }

    /// GET `path` and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.config.base_url, path);
        let mut last_error = None;

        for attempt in 0..self.config.max_attempts.max(1) {
            if attempt > 0 {
                let delay = backoff_delay(self.config.retry_base_delay, attempt);
                debug!(attempt, delay_ms = delay.as_millis(), path, "Retrying request");
                sleep(delay).await;
            }

            self.limiter.until_ready().await;

            let mut request = self.http.get(&url);
            if let Some(key) = &self.config.api_key {
                request = request.bearer_auth(key);
            }

            match request.send().await {
                Ok(response) => match response.status() {
                    status if status.is_success() => {
                        return response
                            .json::<T>()
                            .await
                            .with_context(|| format!("Failed to decode response of {path}"));
                    }
                    StatusCode::TOO_MANY_REQUESTS => {
                        warn!(path, attempt, "Rate limited by tonapi, backing off");
                        last_error = Some(anyhow!("rate limited"));
                    }
                    status if status.is_server_error() => {
                        warn!(status = %status, path, attempt, "Server error, retrying");
                        last_error = Some(anyhow!("server error: {status}"));
                    }
                    status => {
                        let body = response.text().await.unwrap_or_default();
                        let message = serde_json::from_str::<ErrorBody>(&body)
                            .map_or(body, |e| e.error);
                        return Err(anyhow!("tonapi error {status}: {message}"));
                    }
                },
                Err(e) => {
                    warn!(error = %e, path, attempt, "Request failed");
                    last_error = Some(e.into());
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| anyhow!("max retries exceeded"))
            .context(format!("GET {path} failed after {} attempts", self.config.max_attempts)))
    }
}
