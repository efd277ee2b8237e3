//! Log-safe rendering of outbound request parameters.
//!
//! Patron names, PINs, and account identifiers are credentials in all but
//! name, so the pipeline masks them before they reach any log record. An
//! opt-in flag additionally emits the raw values at `warn` severity for
//! debugging against the live catalog; it is off unless configuration
//! turns it on. Nothing in this module performs I/O or returns an error,
//! so logging can never abort a fetch.

use secrecy::ExposeSecret;

use crate::request::Credentials;

/// Character standing in for each hidden character of a masked value.
const MASK_CHAR: char = '*';

/// How many trailing characters a masked value keeps visible.
const VISIBLE_TAIL: usize = 4;

/// Placeholder logged in place of a PIN. PINs are never partially shown.
pub const PIN_PLACEHOLDER: &str = "[REDACTED]";

/// Mask a sensitive value, keeping only its last four characters.
///
/// The hidden portion becomes `*`, one per character, so the masked
/// output has the same character count as the input. Values shorter than
/// four characters mask entirely; an empty input stays empty.
#[must_use]
pub fn mask_tail(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let hidden = if chars.len() < VISIBLE_TAIL {
        chars.len()
    } else {
        chars.len() - VISIBLE_TAIL
    };
    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| if i < hidden { MASK_CHAR } else { c })
        .collect()
}

/// Observability hook for the two outbound catalog calls.
///
/// Built once per [`CheckoutClient`](crate::CheckoutClient) from its
/// configuration and handed to each pipeline stage. Every call site gets
/// one masked `info` record; the unmasked `warn` record only exists when
/// the opt-in flag was set.
#[derive(Debug, Clone)]
pub struct RequestLogger {
    log_unmasked: bool,
}

impl RequestLogger {
    /// Create a logger. `log_unmasked` should come straight from
    /// configuration; it defaults to off everywhere.
    #[must_use]
    pub const fn new(log_unmasked: bool) -> Self {
        Self { log_unmasked }
    }

    /// Whether the raw-parameter path is enabled.
    #[must_use]
    pub const fn logs_unmasked(&self) -> bool {
        self.log_unmasked
    }

    /// Record the outbound login call.
    pub fn login_call(&self, url: &str, credentials: &Credentials) {
        tracing::info!(
            url = %url,
            name = %mask_tail(&credentials.name),
            user_pin = PIN_PLACEHOLDER,
            "logging in to library catalog"
        );
        if self.log_unmasked {
            tracing::warn!(
                url = %url,
                name = %credentials.name,
                user_pin = %credentials.pin.expose_secret(),
                "unmasked login parameters (explicitly enabled)"
            );
        }
    }

    /// Record the outbound checkouts call.
    pub fn checkouts_call(&self, url: &str, account_id: &str) {
        tracing::info!(
            url = %url,
            account_id = %mask_tail(account_id),
            "fetching checkouts"
        );
        if self.log_unmasked {
            tracing::warn!(
                url = %url,
                account_id = %account_id,
                "unmasked checkouts parameters (explicitly enabled)"
            );
        }
    }
}
