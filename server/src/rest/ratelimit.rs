//! Rate limit handling for outbound calls.
//!
//! State is scoped to a single call; no bucket tracking is shared between
//! requests.

use std::time::Duration;

use reqwest::header::HeaderMap;
use serde::Deserialize;

/// Wait used when a `429` carries no usable duration.
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(1);

/// How many consecutive `429` responses a single call absorbs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum retries; `None` retries forever.
    pub max_retries: Option<u32>,
}

impl RetryPolicy {
    /// Retry until the remote stops rate limiting.
    pub const fn unbounded() -> Self {
        Self { max_retries: None }
    }

    /// Give up after `max_retries` retries.
    pub const fn bounded(max_retries: u32) -> Self {
        Self {
            max_retries: Some(max_retries),
        }
    }

    /// Whether retry number `attempt` (1-based) may be sent.
    pub const fn allows(&self, attempt: u32) -> bool {
        match self.max_retries {
            Some(max) => attempt <= max,
            None => true,
        }
    }
}

/// Parsed `429` response.
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitInfo {
    /// How long to wait before retransmitting.
    pub retry_after: Duration,
    /// Whether the limit applies to every route.
    pub global: bool,
    /// Limit scope reported by the remote (`user`, `global`, `shared`).
    pub scope: Option<String>,
}

#[derive(Deserialize)]
struct RateLimitBody {
    retry_after: Option<f64>,
    #[serde(default)]
    global: bool,
}

impl RateLimitInfo {
    /// Read the wait duration from a `429` response.
    ///
    /// Precedence: JSON `retry_after`, then `X-RateLimit-Reset-After`, then
    /// `Retry-After`, then [`DEFAULT_RETRY_AFTER`]. All are fractional seconds.
    pub fn from_response(headers: &HeaderMap, body: &[u8]) -> Self {
        let parsed: Option<RateLimitBody> = serde_json::from_slice(body).ok();
        let header_secs = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<f64>().ok())
        };

        let retry_after = parsed
            .as_ref()
            .and_then(|b| b.retry_after)
            .or_else(|| header_secs("x-ratelimit-reset-after"))
            .or_else(|| header_secs("retry-after"))
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
            .unwrap_or(DEFAULT_RETRY_AFTER);

        let global = parsed.as_ref().is_some_and(|b| b.global)
            || headers.contains_key("x-ratelimit-global");

        let scope = headers
            .get("x-ratelimit-scope")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        Self {
            retry_after,
            global,
            scope,
        }
    }
}
