// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the tool server.
//!
//! Handles GET /health, GET /v1/tools, POST /v1/tools/call.

use agenda_core::{AgendaError, ToolCall, ToolDescriptor};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::server::GatewayState;

/// Response body for GET /health.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Response body for GET /v1/tools.
#[derive(Debug, Serialize, Deserialize)]
pub struct ToolListResponse {
    /// Registered tools, in registration order.
    pub tools: Vec<ToolDescriptor>,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(err: &AgendaError) -> Response {
    let status = match err {
        AgendaError::UnknownTool(_) => StatusCode::NOT_FOUND,
        AgendaError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /v1/tools
pub async fn list_tools(State(state): State<GatewayState>) -> Response {
    match state.transport.list_tools().await {
        Ok(tools) => Json(ToolListResponse { tools }).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "listing tools failed");
            error_response(&err)
        }
    }
}

/// POST /v1/tools/call
///
/// Operational tool failures come back as 200 with `isError` set; only an
/// unknown tool name or a registry fault changes the status.
pub async fn call_tool(State(state): State<GatewayState>, Json(call): Json<ToolCall>) -> Response {
    tracing::debug!(tool = call.name.as_str(), "tool call received");
    match state.transport.call_tool(&call.name, call.arguments).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => {
            tracing::warn!(tool = call.name.as_str(), error = %err, "tool call rejected");
            error_response(&err)
        }
    }
}
