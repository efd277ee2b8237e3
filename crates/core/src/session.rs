//! The catalog login exchange and the session handle it produces.

use reqwest::header::CONTENT_TYPE;
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::UpstreamConfig;
use crate::error::CheckoutError;
use crate::logging::RequestLogger;
use crate::request::Credentials;

/// Form content type the login endpoint expects, charset included.
const LOGIN_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// An authenticated, cookie-bearing session with the catalog.
///
/// Produced by [`authenticate`] and consumed by value by exactly one
/// checkouts fetch. The underlying HTTP client owns a cookie store
/// created for this invocation alone, so session cookies cannot leak
/// across requests.
#[derive(Debug)]
pub struct Session {
    client: reqwest::Client,
}

impl Session {
    /// Hand over the HTTP client carrying the login cookies.
    pub(crate) fn into_client(self) -> reqwest::Client {
        self.client
    }
}

/// Exchange patron credentials for a [`Session`].
///
/// Posts the catalog's login form from a fresh cookie store; whatever
/// cookies the response sets are retained for the follow-up fetch. The
/// response body is not inspected beyond the status line.
///
/// # Errors
///
/// Returns [`CheckoutError::LoginFailed`] when the endpoint answers with
/// a non-success status and [`CheckoutError::Transport`] on network or
/// timeout failures. No retry is attempted.
#[instrument(skip_all)]
pub async fn authenticate(
    config: &UpstreamConfig,
    logger: &RequestLogger,
    credentials: &Credentials,
) -> Result<Session, CheckoutError> {
    let client = reqwest::Client::builder()
        .cookie_store(true)
        .timeout(config.timeout)
        .build()?;

    logger.login_call(&config.login_url, credentials);

    let response = client
        .post(&config.login_url)
        .header(CONTENT_TYPE, LOGIN_CONTENT_TYPE)
        .body(login_body(credentials))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(CheckoutError::LoginFailed(format!(
            "HTTP {status}: {error_text}"
        )));
    }

    Ok(Session { client })
}

/// Form-encode the login body.
///
/// Encoded by hand because `.form()` would attach its own bare
/// content-type header alongside [`LOGIN_CONTENT_TYPE`].
fn login_body(credentials: &Credentials) -> String {
    format!(
        "name={}&user_pin={}",
        urlencoding::encode(&credentials.name),
        urlencoding::encode(credentials.pin.expose_secret())
    )
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    #[test]
    fn test_login_body_percent_encodes_fields() {
        let credentials = Credentials {
            name: "Jane Doe".to_string(),
            pin: SecretString::from("12&34"),
        };
        assert_eq!(login_body(&credentials), "name=Jane%20Doe&user_pin=12%2634");
    }

    #[test]
    fn test_login_content_type_carries_charset() {
        assert_eq!(
            LOGIN_CONTENT_TYPE,
            "application/x-www-form-urlencoded; charset=UTF-8"
        );
    }
}
