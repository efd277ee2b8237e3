//! Integration test support for Bookplate.
//!
//! [`StubCatalog`] is an in-process stand-in for the two upstream
//! endpoints: the catalog login form and the gateway checkouts query. It
//! records every hit, captures what the pipeline actually sent, and only
//! answers the checkouts query when the login cookie comes back, which is
//! how the tests prove the two outbound calls share one cookie store.
//!
//! # Test Files
//!
//! - `checkout_pipeline.rs` - the core pipeline against the stub
//! - `server_routes.rs` - the HTTP surface, driven through `tower::ServiceExt`

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Form, Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use bookplate_core::UpstreamConfig;

/// Session cookie a successful stub login sets; the checkouts route
/// requires it verbatim.
pub const SESSION_COOKIE: &str = "stub_session=authenticated";

/// Scripted behavior for a [`StubCatalog`].
#[derive(Debug, Clone)]
pub struct StubBehavior {
    /// Status the login endpoint answers with.
    pub login_status: StatusCode,
    /// Whether a successful login sets the session cookie.
    pub set_cookie: bool,
    /// Status the checkouts endpoint answers with, given a valid cookie.
    pub checkouts_status: StatusCode,
    /// Body the checkouts endpoint returns on success.
    pub checkouts_body: Value,
    /// Delay before the checkouts endpoint answers.
    pub checkouts_delay: Duration,
}

impl Default for StubBehavior {
    fn default() -> Self {
        Self {
            login_status: StatusCode::OK,
            set_cookie: true,
            checkouts_status: StatusCode::OK,
            checkouts_body: json!({ "entities": { "checkouts": {} }, "total": 0 }),
            checkouts_delay: Duration::ZERO,
        }
    }
}

#[derive(Debug)]
struct StubState {
    behavior: StubBehavior,
    set_cookie: AtomicBool,
    login_hits: AtomicUsize,
    checkouts_hits: AtomicUsize,
    last_login_form: Mutex<Option<HashMap<String, String>>>,
    last_login_content_type: Mutex<Option<String>>,
    last_checkouts_query: Mutex<Option<HashMap<String, String>>>,
}

/// An in-process catalog double listening on an ephemeral port.
#[derive(Debug, Clone)]
pub struct StubCatalog {
    addr: SocketAddr,
    state: Arc<StubState>,
}

impl StubCatalog {
    /// Start a stub with the given behavior.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot bind; tests have no use for a stub
    /// that is not running.
    pub async fn spawn(behavior: StubBehavior) -> Self {
        let state = Arc::new(StubState {
            set_cookie: AtomicBool::new(behavior.set_cookie),
            behavior,
            login_hits: AtomicUsize::new(0),
            checkouts_hits: AtomicUsize::new(0),
            last_login_form: Mutex::new(None),
            last_login_content_type: Mutex::new(None),
            last_checkouts_query: Mutex::new(None),
        });

        let app = Router::new()
            .route("/user/login", post(login))
            .route("/checkouts", get(checkouts))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve stub");
        });

        Self { addr, state }
    }

    /// Upstream configuration pointing the pipeline at this stub.
    #[must_use]
    pub fn upstream_config(&self) -> UpstreamConfig {
        UpstreamConfig {
            login_url: format!("http://{}/user/login", self.addr),
            checkouts_url: format!("http://{}/checkouts", self.addr),
            timeout: Duration::from_secs(2),
            log_unmasked_params: false,
        }
    }

    /// Turn the login cookie on or off for subsequent logins.
    pub fn set_login_cookie(&self, set: bool) {
        self.state.set_cookie.store(set, Ordering::SeqCst);
    }

    /// How many login calls the stub has received.
    #[must_use]
    pub fn login_hits(&self) -> usize {
        self.state.login_hits.load(Ordering::SeqCst)
    }

    /// How many checkouts calls the stub has received.
    #[must_use]
    pub fn checkouts_hits(&self) -> usize {
        self.state.checkouts_hits.load(Ordering::SeqCst)
    }

    /// Form fields of the most recent login call.
    #[must_use]
    pub fn last_login_form(&self) -> Option<HashMap<String, String>> {
        self.state.last_login_form.lock().expect("stub lock").clone()
    }

    /// Content type of the most recent login call.
    #[must_use]
    pub fn last_login_content_type(&self) -> Option<String> {
        self.state
            .last_login_content_type
            .lock()
            .expect("stub lock")
            .clone()
    }

    /// Query parameters of the most recent checkouts call.
    #[must_use]
    pub fn last_checkouts_query(&self) -> Option<HashMap<String, String>> {
        self.state
            .last_checkouts_query
            .lock()
            .expect("stub lock")
            .clone()
    }
}

async fn login(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    state.login_hits.fetch_add(1, Ordering::SeqCst);

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string);
    *state.last_login_content_type.lock().expect("stub lock") = content_type;
    *state.last_login_form.lock().expect("stub lock") = Some(fields);

    let status = state.behavior.login_status;
    let mut response_headers = HeaderMap::new();
    if status.is_success() && state.set_cookie.load(Ordering::SeqCst) {
        let cookie = format!("{SESSION_COOKIE}; Path=/; HttpOnly");
        response_headers.insert(
            header::SET_COOKIE,
            HeaderValue::from_str(&cookie).expect("cookie header"),
        );
    }

    (status, response_headers, "welcome").into_response()
}

async fn checkouts(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.checkouts_hits.fetch_add(1, Ordering::SeqCst);
    *state.last_checkouts_query.lock().expect("stub lock") = Some(params);

    if state.behavior.checkouts_delay > Duration::ZERO {
        tokio::time::sleep(state.behavior.checkouts_delay).await;
    }

    let authenticated = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|cookies| cookies.contains(SESSION_COOKIE));
    if !authenticated {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "no session cookie" })),
        )
            .into_response();
    }

    (
        state.behavior.checkouts_status,
        Json(state.behavior.checkouts_body.clone()),
    )
        .into_response()
}
