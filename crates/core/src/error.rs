//! Error types for the checkouts pipeline.

use thiserror::Error;

/// Errors that can occur while fetching a patron's checkouts.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A required caller field is absent or empty. Raised before any
    /// network activity takes place.
    #[error("Missing name, user_pin, or accountId")]
    MissingField,

    /// The catalog login call answered with a non-success status.
    #[error("login failed: {0}")]
    LoginFailed(String),

    /// The checkouts call answered with a non-success status.
    #[error("checkouts fetch failed: {0}")]
    FetchFailed(String),

    /// Network, timeout, or body-decode failure at either step.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl CheckoutError {
    /// HTTP status the caller receives for this failure.
    ///
    /// Incomplete input maps to 400; every failure past the input gate
    /// collapses to 500.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::MissingField => 400,
            Self::LoginFailed(_) | Self::FetchFailed(_) | Self::Transport(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message_is_stable() {
        // Callers match on this exact string; it names the form fields.
        assert_eq!(
            CheckoutError::MissingField.to_string(),
            "Missing name, user_pin, or accountId"
        );
    }

    #[test]
    fn test_missing_field_is_client_error() {
        assert_eq!(CheckoutError::MissingField.status_code(), 400);
    }

    #[test]
    fn test_upstream_failures_are_server_errors() {
        let login = CheckoutError::LoginFailed("HTTP 401 Unauthorized".to_string());
        let fetch = CheckoutError::FetchFailed("HTTP 502 Bad Gateway".to_string());
        assert_eq!(login.status_code(), 500);
        assert_eq!(fetch.status_code(), 500);
    }

    #[test]
    fn test_error_messages_carry_upstream_detail() {
        let error = CheckoutError::LoginFailed("HTTP 401 Unauthorized: bad pin".to_string());
        assert!(error.to_string().contains("login failed"));
        assert!(error.to_string().contains("401"));
    }
}
