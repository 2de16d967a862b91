// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Discovered tools and their bound callables.
//!
//! Descriptors live in one shared, immutable arena. A [`BoundTool`] is an
//! index into it fixed at discovery time, so each callable always reaches
//! its own descriptor no matter how many were built in the same pass.

use std::sync::Arc;

use agenda_core::{AgendaError, ToolDescriptor};
use tracing::debug;

use crate::binding::{ToolArgs, bind_arguments};
use crate::service::ServiceHandle;

/// Tool descriptors for one bridge session, in registry order.
#[derive(Debug, Clone)]
pub struct ToolTable {
    tools: Arc<[ToolDescriptor]>,
}

impl ToolTable {
    pub fn new(tools: Vec<ToolDescriptor>) -> Self {
        Self {
            tools: tools.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn descriptors(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// One callable per descriptor, all sharing `service`.
    pub fn bind(&self, service: &ServiceHandle) -> Vec<BoundTool> {
        (0..self.tools.len())
            .map(|index| {
                debug!(tool = self.tools[index].name.as_str(), index, "binding tool");
                BoundTool {
                    table: Arc::clone(&self.tools),
                    index,
                    service: service.clone(),
                }
            })
            .collect()
    }
}

/// A synchronous callable for one remote tool. Cheap to clone and safe to
/// call from any thread except the service thread.
#[derive(Clone)]
pub struct BoundTool {
    table: Arc<[ToolDescriptor]>,
    index: usize,
    service: ServiceHandle,
}

impl BoundTool {
    pub fn descriptor(&self) -> &ToolDescriptor {
        &self.table[self.index]
    }

    pub fn name(&self) -> &str {
        &self.descriptor().name
    }

    pub fn description(&self) -> &str {
        &self.descriptor().description
    }

    pub fn parameter_names(&self) -> &[String] {
        &self.descriptor().parameter_names
    }

    /// Binds `args` to this tool's parameters and invokes it, blocking
    /// until the text result arrives or the timeout fires.
    pub fn call(&self, args: ToolArgs) -> Result<String, AgendaError> {
        let descriptor = self.descriptor();
        let arguments = bind_arguments(descriptor, args);
        self.service.call(&descriptor.name, arguments)
    }
}

impl std::fmt::Debug for BoundTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundTool")
            .field("name", &self.name())
            .field("index", &self.index)
            .finish()
    }
}
