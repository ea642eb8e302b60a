//! REST Error Types

use thiserror::Error;

/// Errors surfaced by [`super::RestClient`].
///
/// Rate limiting is retried internally and only appears here when a bounded
/// [`super::RetryPolicy`] runs out of attempts.
#[derive(Debug, Error)]
pub enum RestError {
    /// Remote answered with a non-success, non-429 status.
    #[error("HTTP {status}: {body}")]
    Transport {
        /// Response status code.
        status: u16,
        /// Response body as text.
        body: String,
    },

    /// Connection, TLS, or timeout failure.
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON.
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Retry budget exhausted while rate limited.
    #[error("Rate limited, retry after {retry_after:.3}s")]
    RateLimited {
        /// Last advertised wait in seconds.
        retry_after: f64,
    },
}

impl RestError {
    /// HTTP status for [`RestError::Transport`].
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Remote reported the resource as missing.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Transport { status: 404, .. })
    }
}
