//! Upstream endpoint configuration for the checkouts pipeline.

use std::time::Duration;

/// Login endpoint of the hosted library catalog. The query suffix pins
/// the post-login destination the catalog expects.
pub const DEFAULT_LOGIN_URL: &str =
    "https://aclibrary.bibliocommons.com/user/login?destination=%2Faccount%2Fcontact_preferences";

/// Checkouts endpoint of the account gateway.
pub const DEFAULT_CHECKOUTS_URL: &str =
    "https://gateway.bibliocommons.com/v2/libraries/aclibrary/checkouts";

/// Default timeout applied to each outbound call.
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the pipeline's two outbound calls go and how they behave.
///
/// The defaults target the hosted catalog; tests point both URLs at a
/// stub server instead.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Form-login endpoint.
    pub login_url: String,
    /// Checkouts query endpoint.
    pub checkouts_url: String,
    /// Timeout for each outbound call.
    pub timeout: Duration,
    /// Emit raw request parameters at `warn` severity. Off by default;
    /// see [`RequestLogger`](crate::logging::RequestLogger).
    pub log_unmasked_params: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            login_url: DEFAULT_LOGIN_URL.to_string(),
            checkouts_url: DEFAULT_CHECKOUTS_URL.to_string(),
            timeout: DEFAULT_UPSTREAM_TIMEOUT,
            log_unmasked_params: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_target_the_hosted_catalog() {
        let config = UpstreamConfig::default();
        assert!(config.login_url.starts_with("https://aclibrary.bibliocommons.com/user/login"));
        assert!(config.checkouts_url.ends_with("/checkouts"));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_unmasked_logging_defaults_off() {
        assert!(!UpstreamConfig::default().log_unmasked_params);
    }

    #[test]
    fn test_login_destination_is_percent_encoded() {
        // The catalog redirects to this path after login; it travels
        // inside the query string and must stay encoded.
        assert!(DEFAULT_LOGIN_URL.contains("destination=%2Faccount%2Fcontact_preferences"));
    }
}
