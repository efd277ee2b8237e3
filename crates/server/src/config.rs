//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the proxy runs with no configuration at
//! all.
//!
//! - `BOOKPLATE_HOST` - bind address (default: 127.0.0.1)
//! - `BOOKPLATE_PORT` - listen port (default: 5000)
//! - `BOOKPLATE_LOGIN_URL` - catalog login endpoint override
//! - `BOOKPLATE_CHECKOUTS_URL` - gateway checkouts endpoint override
//! - `BOOKPLATE_UPSTREAM_TIMEOUT_SECS` - outbound call timeout (default: 30)
//! - `BOOKPLATE_LOG_UNMASKED_PARAMS` - log raw request parameters (default: off)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use bookplate_core::UpstreamConfig;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Upstream endpoints and pipeline options
    pub upstream: UpstreamConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Loads `.env` first if one is present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("BOOKPLATE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("BOOKPLATE_HOST".to_string(), e.to_string()))?;

        let port = get_env_or_default("BOOKPLATE_PORT", "5000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("BOOKPLATE_PORT".to_string(), e.to_string()))?;

        let timeout_secs = get_env_or_default("BOOKPLATE_UPSTREAM_TIMEOUT_SECS", "30")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar(
                    "BOOKPLATE_UPSTREAM_TIMEOUT_SECS".to_string(),
                    e.to_string(),
                )
            })?;

        let defaults = UpstreamConfig::default();
        let upstream = UpstreamConfig {
            login_url: get_env_or_default("BOOKPLATE_LOGIN_URL", &defaults.login_url),
            checkouts_url: get_env_or_default("BOOKPLATE_CHECKOUTS_URL", &defaults.checkouts_url),
            timeout: Duration::from_secs(timeout_secs),
            log_unmasked_params: env_flag("BOOKPLATE_LOG_UNMASKED_PARAMS"),
        };

        Ok(Self {
            host,
            port,
            upstream,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read an opt-in flag. Unset means off.
fn env_flag(key: &str) -> bool {
    std::env::var(key).is_ok_and(|value| parse_flag(&value))
}

/// Accepts "1", "true", and "yes" in any case as on.
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_accepts_common_affirmatives() {
        assert!(parse_flag("1"));
        assert!(parse_flag("true"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("yes"));
        assert!(parse_flag(" Yes "));
    }

    #[test]
    fn test_parse_flag_rejects_everything_else() {
        assert!(!parse_flag("0"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("no"));
        assert!(!parse_flag(""));
        assert!(!parse_flag("enabled"));
    }

    #[test]
    fn test_socket_addr_combines_host_and_port() {
        let config = ServerConfig {
            host: "0.0.0.0".parse().expect("valid address"),
            port: 5000,
            upstream: UpstreamConfig::default(),
            sentry_dsn: None,
        };
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:5000");
    }
}
