//! Caller-supplied request fields and the presence gate.

use secrecy::{ExposeSecret, SecretString};

use crate::error::CheckoutError;

/// Patron credentials for the catalog login form.
///
/// The PIN lives in a [`SecretString`] so `Debug` output can never carry
/// it. Presence is the only validation applied; the catalog itself is the
/// authority on whether the pair is correct.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Patron name exactly as the catalog expects it in the `name` field.
    pub name: String,
    /// Account PIN, sent as the `user_pin` form field.
    pub pin: SecretString,
}

/// One checkouts lookup: who is logging in and which account to read.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    /// Login credentials.
    pub credentials: Credentials,
    /// Opaque account identifier forwarded to the checkouts query.
    pub account_id: String,
}

impl CheckoutRequest {
    /// Build a request from the raw caller-supplied field values.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        pin: impl Into<String>,
        account_id: impl Into<String>,
    ) -> Self {
        Self {
            credentials: Credentials {
                name: name.into(),
                pin: SecretString::from(pin.into()),
            },
            account_id: account_id.into(),
        }
    }

    /// Check that all three required fields are present.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingField`] if the name, the PIN, or
    /// the account id is empty. Nothing else is checked.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        if self.credentials.name.is_empty()
            || self.credentials.pin.expose_secret().is_empty()
            || self.account_id.is_empty()
        {
            return Err(CheckoutError::MissingField);
        }
        Ok(())
    }
}
