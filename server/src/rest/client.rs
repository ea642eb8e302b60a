//! REST Client
//!
//! Thin wrapper over `reqwest` that retries `429` responses transparently.
//! Concurrent calls share the connection pool; a sleeping call does not block
//! any other call.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, warn};

use super::error::RestError;
use super::ratelimit::{RateLimitInfo, RetryPolicy};
use super::routes;
use crate::config::Config;

/// Characters of an error body kept in logs.
const LOG_BODY_PREVIEW: usize = 500;

const USER_AGENT: &str = concat!(
    "DiscordBot (https://github.com/yourorg/interactions, ",
    env!("CARGO_PKG_VERSION"),
    ")"
);

/// Outbound client for the remote REST API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    token: Option<Arc<str>>,
    retry: RetryPolicy,
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[redacted]"))
            .field("retry", &self.retry)
            .finish()
    }
}

impl RestClient {
    /// Create a client for `base_url` (e.g. `https://discord.com/api/v10`).
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        retry: RetryPolicy,
        timeout: Duration,
    ) -> Result<Self, RestError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').into(),
            token: token.map(Into::into),
            retry,
        })
    }

    /// Create a client from server configuration.
    ///
    /// A missing bot token is allowed here; follow-up calls are addressed by
    /// interaction token and do not need one.
    pub fn from_config(config: &Config) -> Result<Self, RestError> {
        Self::new(
            config.api_base.clone(),
            config.bot_token.clone(),
            RetryPolicy {
                max_retries: config.max_rate_limit_retries,
            },
            config.http_timeout(),
        )
    }

    /// Retry policy in effect.
    pub const fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Issue a call and return the JSON response (`Null` for empty bodies).
    pub async fn call(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value, RestError> {
        self.call_json(method, endpoint, body).await
    }

    /// Issue a call with a typed body and decode a typed response.
    pub async fn call_json<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<T, RestError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let payload = body.map(serde_json::to_vec).transpose()?.map(Bytes::from);
        let bytes = self.send(method, endpoint, payload).await?;
        if bytes.is_empty() {
            return Ok(serde_json::from_value(serde_json::Value::Null)?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Issue a call whose response body is ignored.
    pub async fn call_empty<B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<(), RestError>
    where
        B: Serialize + ?Sized,
    {
        let payload = body.map(serde_json::to_vec).transpose()?.map(Bytes::from);
        self.send(method, endpoint, payload).await.map(drop)
    }

    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        payload: Option<Bytes>,
    ) -> Result<Bytes, RestError> {
        let url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        let log_endpoint = routes::redacted(endpoint);
        let mut attempt: u32 = 0;

        loop {
            let mut request = self.http.request(method.clone(), &url);
            if let Some(token) = &self.token {
                request = request.header(AUTHORIZATION, format!("Bot {token}"));
            }
            if let Some(payload) = &payload {
                request = request
                    .header(CONTENT_TYPE, "application/json")
                    .body(payload.clone());
            }

            let response = request.send().await.map_err(|e| {
                let e = e.without_url();
                error!(method = %method, endpoint = %log_endpoint, error = %e, "REST request failed");
                RestError::Http(e)
            })?;
            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                let headers = response.headers().clone();
                let body = response.bytes().await.map_err(strip_url)?;
                let info = RateLimitInfo::from_response(&headers, &body);
                attempt += 1;

                if !self.retry.allows(attempt) {
                    warn!(
                        method = %method,
                        endpoint = %log_endpoint,
                        attempt,
                        retry_after = info.retry_after.as_secs_f64(),
                        "Rate limit retries exhausted"
                    );
                    return Err(RestError::RateLimited {
                        retry_after: info.retry_after.as_secs_f64(),
                    });
                }

                warn!(
                    method = %method,
                    endpoint = %log_endpoint,
                    attempt,
                    retry_after = info.retry_after.as_secs_f64(),
                    global = info.global,
                    scope = info.scope.as_deref().unwrap_or("unknown"),
                    "Rate limited, backing off"
                );
                tokio::time::sleep(info.retry_after).await;
                continue;
            }

            let body = response.bytes().await.map_err(strip_url)?;
            if !status.is_success() {
                let text = String::from_utf8_lossy(&body).into_owned();
                let preview: String = text.chars().take(LOG_BODY_PREVIEW).collect();
                error!(
                    method = %method,
                    endpoint = %log_endpoint,
                    status = status.as_u16(),
                    body_preview = %preview,
                    "REST call returned error status"
                );
                return Err(RestError::Transport {
                    status: status.as_u16(),
                    body: text,
                });
            }

            debug!(method = %method, endpoint = %log_endpoint, status = status.as_u16(), "REST call succeeded");
            return Ok(body);
        }
    }
}

/// Drop the request URL, which may embed an interaction token.
fn strip_url(e: reqwest::Error) -> RestError {
    RestError::Http(e.without_url())
}
