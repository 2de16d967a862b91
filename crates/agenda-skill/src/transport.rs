// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process [`ToolTransport`] over a [`ToolRegistry`].

use std::sync::Arc;

use agenda_core::{AgendaError, ToolArguments, ToolDescriptor, ToolResponse, ToolTransport};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::tool::{ToolOutput, ToolRegistry};

/// Serves a registry through the tool protocol primitives. The gateway and
/// the in-process bridge both sit on top of this.
#[derive(Clone)]
pub struct RegistryTransport {
    registry: Arc<ToolRegistry>,
}

impl RegistryTransport {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }
}

#[async_trait]
impl ToolTransport for RegistryTransport {
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, AgendaError> {
        Ok(self.registry.descriptors())
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: ToolArguments,
    ) -> Result<ToolResponse, AgendaError> {
        let tool = self
            .registry
            .get(name)
            .ok_or_else(|| AgendaError::UnknownTool(name.to_string()))?;

        debug!(tool = name, "invoking tool");
        let output = match tool.invoke(serde_json::Value::Object(arguments)).await {
            Ok(output) => output,
            Err(err) => {
                warn!(tool = name, error = %err, "tool invocation failed");
                ToolOutput::failure(name, &err)
            }
        };
        Ok(output.into())
    }
}
