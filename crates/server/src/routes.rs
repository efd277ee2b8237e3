//! Route handlers for the checkouts proxy.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use bookplate_core::{CheckoutClient, CheckoutRequest};

/// Build the application router around a checkout client.
///
/// CORS allows any origin: the proxy is consumed by browser apps served
/// from elsewhere and holds no cross-request state.
#[must_use]
pub fn router(client: CheckoutClient) -> Router {
    Router::new()
        .route("/checkouts", get(checkouts))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(client)
}

/// Query parameters of the checkouts route.
///
/// Every field is optional at the HTTP layer so that missing values reach
/// the pipeline's own gate, which answers with the contract 400 body
/// instead of a framework rejection.
#[derive(Debug, Deserialize)]
struct CheckoutsQuery {
    #[serde(default)]
    name: String,
    #[serde(default)]
    user_pin: String,
    #[serde(default, rename = "accountId")]
    account_id: String,
}

/// Proxy one checkouts lookup.
async fn checkouts(
    State(client): State<CheckoutClient>,
    Query(query): Query<CheckoutsQuery>,
) -> impl IntoResponse {
    let request = CheckoutRequest::new(query.name, query.user_pin, query.account_id);
    let outcome = client.fetch_checkouts(&request).await;
    let status =
        StatusCode::from_u16(outcome.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(outcome.body))
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
