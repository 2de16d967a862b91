// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool trait and registry.
//!
//! The registry preserves registration order: it is the order remote callers
//! see in a tool listing, and parameter names are read from each schema's
//! `properties` in declaration order.

use std::collections::HashMap;
use std::sync::Arc;

use agenda_core::{AgendaError, ToolDescriptor, ToolResponse};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Output from a tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Human-readable result text, also on failure.
    pub content: String,
    /// Whether the text describes a failure.
    pub is_error: bool,
}

impl ToolOutput {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    /// A failure rendered as `<tool>: <error>`.
    pub fn failure(tool: &str, err: &AgendaError) -> Self {
        Self {
            content: format!("{tool}: {err}"),
            is_error: true,
        }
    }
}

impl From<ToolOutput> for ToolResponse {
    fn from(output: ToolOutput) -> Self {
        ToolResponse::text(output.content, output.is_error)
    }
}

/// Unified trait for every tool the agent can call.
///
/// `invoke` receives the argument object exactly as sent by the caller.
/// Operational failures (bad arguments, provider errors) belong in a
/// [`ToolOutput`] with `is_error` set; `Err` is for faults of the tool
/// machinery itself.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON Schema of the input object. Property order is the declared
    /// parameter order.
    fn parameters_schema(&self) -> serde_json::Value;

    async fn invoke(&self, input: serde_json::Value) -> Result<ToolOutput, AgendaError>;
}

/// Registry of available tools, in registration order.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Registers a tool under its `name()`. Re-registering a name replaces
    /// the tool in place.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        match self.index.get(&name) {
            Some(&i) => self.tools[i] = tool,
            None => {
                self.index.insert(name, self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.index.get(name).map(|&i| Arc::clone(&self.tools[i]))
    }

    /// (name, description) pairs in registration order.
    pub fn list(&self) -> Vec<(&str, &str)> {
        self.tools
            .iter()
            .map(|t| (t.name(), t.description()))
            .collect()
    }

    /// Descriptors of every tool, as served by the "list tools" primitive.
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools
            .iter()
            .map(|t| ToolDescriptor {
                name: t.name().to_string(),
                description: t.description().to_string(),
                parameter_names: parameter_names(&t.parameters_schema()),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Keys of `schema.properties`, in declaration order.
pub fn parameter_names(schema: &serde_json::Value) -> Vec<String> {
    schema
        .get("properties")
        .and_then(serde_json::Value::as_object)
        .map(|props| props.keys().cloned().collect())
        .unwrap_or_default()
}
