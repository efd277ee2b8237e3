//! The checkouts pipeline driver.

use std::sync::Arc;

use tracing::instrument;

use crate::checkouts;
use crate::config::UpstreamConfig;
use crate::error::CheckoutError;
use crate::logging::RequestLogger;
use crate::outcome::CheckoutOutcome;
use crate::request::CheckoutRequest;
use crate::session;

/// Fetches a patron's current checkouts from the library catalog.
///
/// One instance serves any number of concurrent lookups. Every lookup
/// validates its input, logs in with a fresh cookie store, fetches the
/// checkouts, and folds the result into a [`CheckoutOutcome`]; nothing is
/// shared between lookups except this configuration.
#[derive(Debug, Clone)]
pub struct CheckoutClient {
    inner: Arc<CheckoutClientInner>,
}

#[derive(Debug)]
struct CheckoutClientInner {
    config: UpstreamConfig,
    logger: RequestLogger,
}

impl CheckoutClient {
    /// Create a client for the configured upstream endpoints.
    #[must_use]
    pub fn new(config: UpstreamConfig) -> Self {
        let logger = RequestLogger::new(config.log_unmasked_params);
        Self {
            inner: Arc::new(CheckoutClientInner { config, logger }),
        }
    }

    /// The upstream configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &UpstreamConfig {
        &self.inner.config
    }

    /// Run one checkouts lookup end to end.
    ///
    /// Never returns an error: rejected input, upstream refusals, and
    /// transport failures all fold into the returned outcome's status
    /// code and body.
    #[instrument(skip_all)]
    pub async fn fetch_checkouts(&self, request: &CheckoutRequest) -> CheckoutOutcome {
        match self.run(request).await {
            Ok(body) => CheckoutOutcome::success(body),
            Err(error) => {
                tracing::warn!(error = %error, "checkouts lookup failed");
                CheckoutOutcome::from_error(&error)
            }
        }
    }

    async fn run(&self, request: &CheckoutRequest) -> Result<serde_json::Value, CheckoutError> {
        request.validate()?;
        let session =
            session::authenticate(&self.inner.config, &self.inner.logger, &request.credentials)
                .await?;
        checkouts::fetch(
            session,
            &self.inner.config,
            &self.inner.logger,
            &request.account_id,
        )
        .await
    }
}
