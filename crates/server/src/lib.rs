//! Bookplate Server - HTTP surface for the checkouts proxy.
//!
//! A deliberately thin layer: one `/checkouts` route that feeds the
//! caller's query parameters into the `bookplate-core` pipeline and
//! relays its `{statusCode, body}` outcome, plus a health probe. All
//! fetch logic, masking, and error mapping live in the core crate.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod routes;

pub use config::{ConfigError, ServerConfig};
pub use routes::router;
