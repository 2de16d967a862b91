// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The two primitives of the remote tool protocol.

use async_trait::async_trait;

use crate::error::AgendaError;
use crate::types::{ToolArguments, ToolDescriptor, ToolResponse};

/// Connection to a remote tool registry.
///
/// Session handshakes and framing are the implementor's business; the bridge
/// only needs "list tools" and "call tool by name with an argument map".
#[async_trait]
pub trait ToolTransport: Send + Sync {
    /// Lists the tools the registry exposes, in registry order.
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, AgendaError>;

    /// Calls one tool. Fails with [`AgendaError::Transport`] on disconnect.
    async fn call_tool(
        &self,
        name: &str,
        arguments: ToolArguments,
    ) -> Result<ToolResponse, AgendaError>;
}
