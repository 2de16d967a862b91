// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted tool registry for bridge tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use agenda_core::{AgendaError, ToolArguments, ToolDescriptor, ToolResponse, ToolTransport};
use async_trait::async_trait;
use tokio::sync::Mutex;

/// How a mock tool answers.
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Replies `"<tool> <arguments as JSON>"`.
    Echo,
    /// Replies with fixed text.
    Reply(String),
    /// Sleeps, then echoes.
    Delay(Duration),
    /// Never completes.
    Hang,
    /// Replies with zero content elements.
    Empty,
    /// Fails as a dropped connection would.
    Disconnect,
    /// Panics inside the call.
    Panic,
}

/// Counts futures dropped before completion.
struct DropGuard {
    counter: Arc<AtomicUsize>,
    armed: bool,
}

impl Drop for DropGuard {
    fn drop(&mut self) {
        if self.armed {
            self.counter.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// A [`ToolTransport`] with a fixed tool table and per-tool behavior.
/// Tools without an explicit behavior echo.
#[derive(Clone, Default)]
pub struct MockTransport {
    tools: Vec<ToolDescriptor>,
    behaviors: HashMap<String, Behavior>,
    calls: Arc<Mutex<Vec<(String, ToolArguments)>>>,
    abandoned: Arc<AtomicUsize>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a tool with ordered parameter names.
    pub fn with_tool(mut self, name: &str, parameters: &[&str]) -> Self {
        self.tools.push(ToolDescriptor {
            name: name.to_string(),
            description: format!("mock tool {name}"),
            parameter_names: parameters.iter().map(|p| p.to_string()).collect(),
        });
        self
    }

    pub fn with_behavior(mut self, name: &str, behavior: Behavior) -> Self {
        self.behaviors.insert(name.to_string(), behavior);
        self
    }

    /// Every call received so far, in arrival order.
    pub async fn calls(&self) -> Vec<(String, ToolArguments)> {
        self.calls.lock().await.clone()
    }

    /// Number of calls whose future was dropped before finishing, i.e.
    /// cancelled by the caller.
    pub fn abandoned(&self) -> usize {
        self.abandoned.load(Ordering::SeqCst)
    }
}

fn echo(name: &str, arguments: &ToolArguments) -> ToolResponse {
    let json = serde_json::Value::Object(arguments.clone());
    ToolResponse::text(format!("{name} {json}"), false)
}

#[async_trait]
impl ToolTransport for MockTransport {
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, AgendaError> {
        Ok(self.tools.clone())
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: ToolArguments,
    ) -> Result<ToolResponse, AgendaError> {
        if !self.tools.iter().any(|t| t.name == name) {
            return Err(AgendaError::UnknownTool(name.to_string()));
        }
        self.calls
            .lock()
            .await
            .push((name.to_string(), arguments.clone()));

        let behavior = self.behaviors.get(name).cloned().unwrap_or(Behavior::Echo);
        if matches!(behavior, Behavior::Panic) {
            panic!("mock tool {name} panicked");
        }

        let mut guard = DropGuard {
            counter: Arc::clone(&self.abandoned),
            armed: true,
        };

        let response = match behavior {
            Behavior::Echo => Ok(echo(name, &arguments)),
            Behavior::Reply(text) => Ok(ToolResponse::text(text, false)),
            Behavior::Delay(after) => {
                tokio::time::sleep(after).await;
                Ok(echo(name, &arguments))
            }
            Behavior::Hang => std::future::pending().await,
            Behavior::Empty => Ok(ToolResponse::default()),
            Behavior::Disconnect => Err(AgendaError::transport("connection reset by peer")),
            Behavior::Panic => unreachable!("handled before the guard is armed"),
        };

        guard.armed = false;
        response
    }
}
