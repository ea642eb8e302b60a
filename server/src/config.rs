//! Server Configuration
//!
//! Loads configuration from environment variables. Credentials are optional at
//! load time and checked by the `require_*` accessors before first use.

use std::env;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;

/// Default remote API base.
pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";

/// A required setting was absent.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable not set.
    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080")
    pub bind_address: String,

    /// Versioned REST API base URL
    pub api_base: String,

    /// Bot token used for catalog management
    pub bot_token: Option<String>,

    /// Hex-encoded Ed25519 public key for inbound verification
    pub public_key: Option<String>,

    /// Application id used to address commands and follow-ups
    pub application_id: Option<String>,

    /// Guild used for catalog sync during development (global when unset)
    pub dev_guild_id: Option<String>,

    /// Overwrite the remote catalog with the builtin commands at startup
    pub sync_commands_on_start: bool,

    /// Per-request timeout for outbound REST calls in seconds (default: 10)
    pub http_timeout_secs: u64,

    /// Cap on consecutive 429 retries per call (unbounded when unset)
    pub max_rate_limit_retries: Option<u32>,

    /// Maximum accepted webhook body size in bytes (default: 64 KiB)
    pub max_body_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            api_base: env::var("DISCORD_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into()),
            bot_token: non_empty("DISCORD_BOT_TOKEN"),
            public_key: non_empty("DISCORD_PUBLIC_KEY"),
            application_id: non_empty("DISCORD_APPLICATION_ID"),
            dev_guild_id: non_empty("DISCORD_DEV_GUILD_ID"),
            sync_commands_on_start: env::var("SYNC_COMMANDS_ON_START")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            max_rate_limit_retries: env::var("REST_MAX_RATE_LIMIT_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok()),
            max_body_bytes: env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(64 * 1024),
        }
    }

    /// Log a warning for every credential that is not configured.
    pub fn warn_missing(&self) {
        for (var, value) in [
            ("DISCORD_BOT_TOKEN", &self.bot_token),
            ("DISCORD_PUBLIC_KEY", &self.public_key),
            ("DISCORD_APPLICATION_ID", &self.application_id),
        ] {
            if value.is_none() {
                warn!(var, "Credential not configured");
            }
        }
    }

    /// Bot token, or an error naming the variable.
    pub fn require_bot_token(&self) -> Result<&str, ConfigError> {
        self.bot_token
            .as_deref()
            .ok_or(ConfigError::Missing("DISCORD_BOT_TOKEN"))
    }

    /// Public key, or an error naming the variable.
    pub fn require_public_key(&self) -> Result<&str, ConfigError> {
        self.public_key
            .as_deref()
            .ok_or(ConfigError::Missing("DISCORD_PUBLIC_KEY"))
    }

    /// Application id, or an error naming the variable.
    pub fn require_application_id(&self) -> Result<&str, ConfigError> {
        self.application_id
            .as_deref()
            .ok_or(ConfigError::Missing("DISCORD_APPLICATION_ID"))
    }

    /// Outbound request timeout.
    #[must_use]
    pub const fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Create a default configuration for testing.
    ///
    /// Credentials are placeholders; tests that verify signatures overwrite
    /// `public_key` with the key of their own signing pair.
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".into(),
            api_base: "http://127.0.0.1:9".into(),
            bot_token: Some("test-token".into()),
            public_key: None,
            application_id: Some("1000".into()),
            dev_guild_id: None,
            sync_commands_on_start: false,
            http_timeout_secs: 5,
            max_rate_limit_retries: None,
            max_body_bytes: 64 * 1024,
        }
    }
}

fn non_empty(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.trim().is_empty())
}
