//! The authenticated checkouts query.

use reqwest::header::ACCEPT;
use tracing::instrument;

use crate::config::UpstreamConfig;
use crate::error::CheckoutError;
use crate::logging::RequestLogger;
use crate::session::Session;

/// Fetch the account's current checkouts with an authenticated session.
///
/// Consumes the session: one login pays for exactly one fetch. Except for
/// `accountId`, the query parameter set is a fixed contract with the
/// gateway and is sent verbatim on every call. The response body passes
/// through as untouched JSON.
///
/// # Errors
///
/// Returns [`CheckoutError::FetchFailed`] on a non-success status and
/// [`CheckoutError::Transport`] on network, timeout, or body-decode
/// failures.
#[instrument(skip_all)]
pub async fn fetch(
    session: Session,
    config: &UpstreamConfig,
    logger: &RequestLogger,
    account_id: &str,
) -> Result<serde_json::Value, CheckoutError> {
    logger.checkouts_call(&config.checkouts_url, account_id);

    let response = session
        .into_client()
        .get(checkouts_url(&config.checkouts_url, account_id))
        .header(ACCEPT, "application/json")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(CheckoutError::FetchFailed(format!(
            "HTTP {status}: {error_text}"
        )));
    }

    let body = response.json().await?;
    Ok(body)
}

/// Append the fixed query parameter contract to the checkouts endpoint.
///
/// Only `accountId` varies per caller; the rest is the same on every
/// call.
fn checkouts_url(base: &str, account_id: &str) -> String {
    format!(
        "{base}?accountId={}&size=100&page=1&sort=status&materialType=PHYSICAL&locale=en-US",
        urlencoding::encode(account_id)
    )
}
