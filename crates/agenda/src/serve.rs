// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `agenda serve`: the built-in registry behind the HTTP tool server.

use std::sync::Arc;

use agenda_calendar::GoogleCalendar;
use agenda_config::AgendaConfig;
use agenda_core::AgendaError;
use agenda_gateway::{AuthConfig, GatewayState};
use agenda_skill::builtin::register_builtins;
use agenda_skill::{RegistryTransport, ToolRegistry};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Registers every built-in tool against the configured Google Calendar.
pub fn build_transport(config: &AgendaConfig) -> Result<Arc<RegistryTransport>, AgendaError> {
    let calendar = GoogleCalendar::from_config(&config.calendar)?;
    let mut registry = ToolRegistry::new();
    register_builtins(&mut registry, config, Arc::new(calendar))?;
    info!(count = registry.len(), calendar = config.calendar.calendar_id.as_str(), "tools registered");
    Ok(Arc::new(RegistryTransport::new(Arc::new(registry))))
}

/// Runs the tool server until SIGINT or SIGTERM.
pub fn run(config: AgendaConfig) -> Result<(), AgendaError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| AgendaError::Internal(format!("failed to build runtime: {e}")))?;

    runtime.block_on(async move {
        let transport = build_transport(&config)?;
        let auth = AuthConfig::for_server(&config.server);
        if auth.is_open() {
            info!(host = config.server.host.as_str(), "no bearer token set; tool routes are open on loopback");
        } else if auth.bearer_token.is_none() {
            warn!(
                host = config.server.host.as_str(),
                "server.bearer_token is not set on a non-loopback bind; tool routes will reject every request"
            );
        }
        let state = GatewayState::new(transport, auth);

        let cancel = install_signal_handler();
        agenda_gateway::start_server(&config.server, state, async move {
            cancel.cancelled().await;
        })
        .await
    })
}

/// Returns a token cancelled on SIGINT or SIGTERM.
fn install_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();

    tokio::spawn(async move {
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};
            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    tokio::select! {
                        _ = ctrl_c => info!("received SIGINT (Ctrl+C), shutting down"),
                        _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
                    }
                }
                Err(e) => {
                    warn!(error = %e, "failed to install SIGTERM handler");
                    let _ = ctrl_c.await;
                    info!("received SIGINT (Ctrl+C), shutting down");
                }
            }
        }

        #[cfg(not(unix))]
        {
            let _ = ctrl_c.await;
            info!("received Ctrl+C, shutting down");
        }

        trigger.cancel();
        debug!("shutdown signal handler completed");
    });

    token
}

/// Installs the tracing subscriber. `RUST_LOG` wins over `agent.log_level`.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("agenda={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
