// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP tool server.
//!
//! Exposes any [`ToolTransport`](agenda_core::ToolTransport), normally the
//! in-process registry, over a small REST API so the invocation bridge can
//! run in a separate process.

pub mod auth;
pub mod handlers;
pub mod server;

pub use auth::AuthConfig;
pub use server::{GatewayState, bind, router, serve, start_server};
