// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool server built on axum.
//!
//! Sets up routes, middleware, and shared state.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use agenda_config::model::ServerConfig;
use agenda_core::{AgendaError, ToolTransport};
use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::{AuthConfig, auth_middleware};
use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// The registry being served.
    pub transport: Arc<dyn ToolTransport>,
    pub auth: AuthConfig,
    /// Process start time for uptime reporting.
    pub start_time: Instant,
}

impl GatewayState {
    pub fn new(transport: Arc<dyn ToolTransport>, auth: AuthConfig) -> Self {
        Self {
            transport,
            auth,
            start_time: Instant::now(),
        }
    }
}

/// Builds the application router:
/// - GET /health (public)
/// - GET /v1/tools (with auth)
/// - POST /v1/tools/call (with auth)
pub fn router(state: GatewayState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route("/v1/tools", get(handlers::list_tools))
        .route("/v1/tools/call", post(handlers::call_tool))
        .route_layer(axum_middleware::from_fn_with_state(
            state.auth.clone(),
            auth_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Binds the configured `host:port`.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener, AgendaError> {
    let addr = format!("{}:{}", config.host, config.port);
    TcpListener::bind(&addr)
        .await
        .map_err(|e| AgendaError::Transport {
            message: format!("failed to bind tool server to {addr}: {e}"),
            source: Some(Box::new(e)),
        })
}

/// Serves `state` on an already bound listener until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: GatewayState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), AgendaError> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "tool server listening");
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| AgendaError::Transport {
            message: format!("tool server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("tool server stopped");
    Ok(())
}

/// Binds and serves in one step.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), AgendaError> {
    let listener = bind(config).await?;
    serve(listener, state, shutdown).await
}
