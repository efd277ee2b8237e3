//! Bookplate Core - authenticated library-checkouts pipeline.
//!
//! Logs into a `BiblioCommons`-style catalog with patron credentials and
//! retrieves the account's current checkouts, relaying the upstream JSON
//! untouched. The HTTP surface that exposes this lives in
//! `bookplate-server`; this crate only needs a Tokio runtime and outbound
//! network access.
//!
//! # Architecture
//!
//! Every lookup runs the same four stages, in order:
//!
//! 1. [`CheckoutRequest::validate`] gates on field presence
//! 2. [`session::authenticate`] posts the login form and captures cookies
//! 3. [`checkouts::fetch`] queries the gateway with those cookies
//! 4. [`CheckoutOutcome`] maps the result to a uniform `{statusCode, body}`
//!
//! [`CheckoutClient`] drives the stages and is the only entry point most
//! callers need. There is no caching and no retrying; each lookup logs in
//! from scratch with its own cookie store.
//!
//! # Modules
//!
//! - [`request`] - caller-supplied fields and the presence gate
//! - [`session`] - the login exchange and the cookie-bearing session
//! - [`checkouts`] - the authenticated checkouts query
//! - [`outcome`] - the `{statusCode, body}` result shape
//! - [`logging`] - masked rendering of outbound parameters
//! - [`config`] - upstream endpoints and pipeline options
//! - [`error`] - pipeline errors and their status mapping

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkouts;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod outcome;
pub mod request;
pub mod session;

pub use client::CheckoutClient;
pub use config::UpstreamConfig;
pub use error::CheckoutError;
pub use outcome::CheckoutOutcome;
pub use request::{CheckoutRequest, Credentials};
