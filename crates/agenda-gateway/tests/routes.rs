// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route tests driven through `tower::ServiceExt::oneshot`.

use agenda_config::model::ServerConfig;
use agenda_core::ToolResponse;
use agenda_gateway::{AuthConfig, GatewayState, router};
use agenda_test_utils::{MockCalendar, TestHarness};
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

fn state_with(auth: AuthConfig) -> GatewayState {
    let harness = TestHarness::new(
        MockCalendar::new().with_events(&[("2025-07-18T09:00:00+08:00", "Standup")]),
    )
    .unwrap();
    GatewayState::new(harness.transport(), auth)
}

fn state(token: Option<&str>) -> GatewayState {
    match token {
        Some(token) => state_with(AuthConfig::bearer(Some(token.into()))),
        None => state_with(AuthConfig::open()),
    }
}

fn post_call(body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::post("/v1/tools/call").header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let app = router(state(Some("s3cret")));
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}

#[tokio::test]
async fn lists_tools_in_registration_order() {
    let app = router(state(None));
    let response = app
        .oneshot(Request::get("/v1/tools").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let names: Vec<&str> = body["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        [
            "google_calendar",
            "get_weather",
            "convert_currency",
            "get_news_headlines",
            "suggest_activity",
            "get_time",
            "get_global_attractions"
        ]
    );
    assert_eq!(body["tools"][1]["parameter_names"], json!(["city"]));
}

#[tokio::test]
async fn calls_a_tool() {
    let app = router(state(None));
    let response = app
        .oneshot(post_call(
            json!({
                "name": "google_calendar",
                "arguments": {"operation": "list_events", "date": "2025-07-18"}
            }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: ToolResponse = serde_json::from_value(json_body(response).await).unwrap();
    assert_eq!(body.first_text(), Some("- 2025-07-18T09:00:00+08:00: Standup"));
    assert!(!body.is_error);
}

#[tokio::test]
async fn tool_failure_is_still_ok_with_error_flag() {
    let app = router(state(None));
    let response = app
        .oneshot(post_call(
            json!({"name": "google_calendar", "arguments": {"operation": "add_event"}}),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["isError"], true);
    assert_eq!(
        body["content"][0]["text"],
        "google_calendar add_event: missing required parameters: title, start, end"
    );
}

#[tokio::test]
async fn unknown_tool_is_not_found() {
    let app = router(state(None));
    let response = app
        .oneshot(post_call(json!({"name": "teleport"}), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"], "unknown tool: teleport");
}

#[tokio::test]
async fn token_is_enforced_when_configured() {
    let app = router(state(Some("s3cret")));

    let denied = app
        .clone()
        .oneshot(Request::get("/v1/tools").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);

    let allowed = app
        .oneshot(post_call(json!({"name": "get_time"}), Some("s3cret")))
        .await
        .unwrap();
    assert_eq!(allowed.status(), StatusCode::OK);
}

#[tokio::test]
async fn tokenless_server_on_a_public_interface_rejects_tool_calls() {
    let config = ServerConfig {
        host: "0.0.0.0".into(),
        port: 1234,
        bearer_token: None,
    };
    let app = router(state_with(AuthConfig::for_server(&config)));

    let listed = app
        .clone()
        .oneshot(Request::get("/v1/tools").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(listed.status(), StatusCode::UNAUTHORIZED);

    let called = app
        .clone()
        .oneshot(post_call(
            json!({"name": "google_calendar", "arguments": {"operation": "add_event"}}),
            Some("guess"),
        ))
        .await
        .unwrap();
    assert_eq!(called.status(), StatusCode::UNAUTHORIZED);

    let health = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(health.status(), StatusCode::OK);
}

#[tokio::test]
async fn tokenless_server_on_loopback_stays_open() {
    let app = router(state_with(AuthConfig::for_server(&ServerConfig::default())));
    let response = app
        .oneshot(post_call(json!({"name": "get_time"}), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
