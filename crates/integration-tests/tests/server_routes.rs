//! HTTP-surface tests for the proxy router.
//!
//! These drive the axum router directly through `tower::ServiceExt`, with
//! the same stub catalog behind it, and pin the route contract: status
//! passthrough, the contract 400 body for missing parameters, and open
//! CORS.

use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use bookplate_core::CheckoutClient;
use bookplate_integration_tests::{StubBehavior, StubCatalog};
use bookplate_server::router;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header("origin", "http://localhost:8080")
        .body(String::new())
        .expect("request")
}

async fn stub_router(behavior: StubBehavior) -> (StubCatalog, axum::Router) {
    let stub = StubCatalog::spawn(behavior).await;
    let client = CheckoutClient::new(stub.upstream_config());
    let app = router(client);
    (stub, app)
}

#[tokio::test]
async fn test_checkouts_route_relays_the_upstream_payload() {
    let body = json!({ "entities": { "checkouts": {} }, "total": 0 });
    let (_stub, app) = stub_router(StubBehavior {
        checkouts_body: body.clone(),
        ..StubBehavior::default()
    })
    .await;

    let response = app
        .oneshot(get_request(
            "/checkouts?name=Jane%20Doe&user_pin=1234&accountId=987654321",
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, body);
}

#[tokio::test]
async fn test_missing_parameters_answer_the_contract_400() {
    let (stub, app) = stub_router(StubBehavior::default()).await;

    // accountId is absent; the route must not reject at the framework
    // layer but let the pipeline's gate answer.
    let response = app
        .oneshot(get_request("/checkouts?name=Jane%20Doe&user_pin=1234"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Missing name, user_pin, or accountId" })
    );
    assert_eq!(stub.login_hits(), 0, "rejected before any upstream call");
}

#[tokio::test]
async fn test_no_query_string_at_all_answers_the_contract_400() {
    let (_stub, app) = stub_router(StubBehavior::default()).await;

    let response = app
        .oneshot(get_request("/checkouts"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Missing name, user_pin, or accountId" })
    );
}

#[tokio::test]
async fn test_upstream_login_failure_surfaces_as_500() {
    let (_stub, app) = stub_router(StubBehavior {
        login_status: StatusCode::UNAUTHORIZED,
        ..StubBehavior::default()
    })
    .await;

    let response = app
        .oneshot(get_request(
            "/checkouts?name=Jane%20Doe&user_pin=1234&accountId=987654321",
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(
        body["error"].as_str().expect("error message").contains("login failed"),
        "got: {body}"
    );
}

#[tokio::test]
async fn test_responses_allow_any_origin() {
    let (_stub, app) = stub_router(StubBehavior::default()).await;

    let response = app
        .oneshot(get_request(
            "/checkouts?name=Jane%20Doe&user_pin=1234&accountId=987654321",
        ))
        .await
        .expect("response");

    let allow_origin = response
        .headers()
        .get("access-control-allow-origin")
        .expect("CORS header present");
    assert_eq!(allow_origin, "*");
}

#[tokio::test]
async fn test_health_endpoint_is_static() {
    let (stub, app) = stub_router(StubBehavior::default()).await;

    let response = app
        .oneshot(get_request("/health"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(stub.login_hits(), 0);
}
