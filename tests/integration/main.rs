//! End-to-end tests for the airline dashboard API.
//!
//! Each test binds the real router on an ephemeral port and talks to it over
//! HTTP, with a fake upstream where live data is needed.
//! Run with: cargo test --test integration

use std::net::SocketAddr;

use airline_dashboard::api::{create_router, AppState};
use airline_dashboard::config::Config;
use axum::{
    routing::{get, post},
    Json, Router,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Serve `router` on an ephemeral port.
async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Start the API against `mcp_url` and return its base URL.
async fn start_api(mcp_url: &str) -> String {
    let config = Config {
        mcp_url: mcp_url.to_string(),
        mcp_timeout_ms: 1000,
        mcp_probe_timeout_ms: 1000,
        metrics_enabled: false,
        ..Config::default()
    };
    let state = AppState::new(&config).unwrap();
    let addr = serve(create_router(state, env!("CARGO_MANIFEST_DIR"))).await;
    format!("http://{}", addr)
}

async fn post_json(url: &str, body: Value) -> (u16, Value) {
    let response = reqwest::Client::new()
        .post(url)
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn unreachable_upstream_serves_mock_data_everywhere() {
    let api = start_api("http://127.0.0.1:1/mcp").await;

    let (status, body) = post_json(
        &format!("{api}/api/search-flights"),
        json!({ "origin": "IST", "destination": "CDG", "date": "2026-02-15", "passengers": 2 }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["source"], json!("mock"));
    assert_eq!(body["flights"].as_array().unwrap().len(), 3);

    let (status, body) = post_json(
        &format!("{api}/api/booking-details"),
        json!({ "pnr": "ABC123", "surname": "Smith" }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["pnr"], json!("ABC123"));
    assert_eq!(body["passenger"], json!("Smith"));

    let health: Value = reqwest::get(format!("{api}/api/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["mcp"], json!("fallback_mode"));
}

#[tokio::test]
async fn live_upstream_payloads_pass_through() {
    let upstream = Router::new()
        .route("/mcp", get(|| async { "mcp" }))
        .route(
            "/mcp/flight-status",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "flight": body["flightNumber"],
                    "status": "DELAYED",
                    "gateChange": true,
                }))
            }),
        );
    let upstream_addr = serve(upstream).await;
    let api = start_api(&format!("http://{}/mcp", upstream_addr)).await;

    let (status, body) = post_json(
        &format!("{api}/api/flight-status"),
        json!({ "flightNumber": "TK1980", "date": "2026-02-15" }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["source"], json!("live"));
    assert_eq!(body["flight"], json!("TK1980"));
    assert_eq!(body["status"], json!("DELAYED"));
    assert_eq!(body["gateChange"], json!(true));

    let health: Value = reqwest::get(format!("{api}/api/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["mcp"], json!("connected"));
}

#[tokio::test]
async fn malformed_body_is_a_500_failure() {
    let api = start_api("http://127.0.0.1:1/mcp").await;

    let response = reqwest::Client::new()
        .post(format!("{api}/api/city-guide"))
        .header("content-type", "application/json")
        .body("{\"city\":")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], json!(false));
}
