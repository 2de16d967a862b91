// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The built-in tool stack wired to a [`MockCalendar`].

use std::sync::Arc;

use agenda_config::AgendaConfig;
use agenda_core::{AgendaError, ToolArguments, ToolResponse, ToolTransport};
use agenda_skill::builtin::register_builtins;
use agenda_skill::{RegistryTransport, ToolRegistry};

use crate::mock_calendar::MockCalendar;

/// Registry, in-process transport, and mock calendar, assembled the way the
/// binary assembles them.
pub struct TestHarness {
    pub config: AgendaConfig,
    pub calendar: MockCalendar,
    pub transport: Arc<RegistryTransport>,
}

impl TestHarness {
    /// Default configuration (Asia/Taipei, `primary`) over `calendar`.
    pub fn new(calendar: MockCalendar) -> Result<Self, AgendaError> {
        Self::with_config(AgendaConfig::default(), calendar)
    }

    pub fn with_config(config: AgendaConfig, calendar: MockCalendar) -> Result<Self, AgendaError> {
        let mut registry = ToolRegistry::new();
        register_builtins(&mut registry, &config, Arc::new(calendar.clone()))?;
        Ok(Self {
            config,
            calendar,
            transport: Arc::new(RegistryTransport::new(Arc::new(registry))),
        })
    }

    /// The transport as the bridge sees it.
    pub fn transport(&self) -> Arc<dyn ToolTransport> {
        Arc::clone(&self.transport) as Arc<dyn ToolTransport>
    }

    /// Calls a tool with a JSON object of arguments.
    pub async fn call(
        &self,
        tool: &str,
        arguments: serde_json::Value,
    ) -> Result<ToolResponse, AgendaError> {
        let arguments = match arguments {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => ToolArguments::new(),
            other => {
                return Err(AgendaError::InvalidArgument {
                    name: "arguments".into(),
                    reason: format!("expected an object, got {other}"),
                });
            }
        };
        self.transport.call_tool(tool, arguments).await
    }
}
