// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cross-runtime tool invocation bridge.
//!
//! Tool implementations are async and live on a service context: a
//! dedicated thread running its own single-threaded tokio runtime that owns
//! the [`ToolTransport`](agenda_core::ToolTransport). Callers are
//! synchronous. [`ToolBridge`] discovers the remote tools once, binds one
//! [`BoundTool`] per descriptor, and every call is marshalled onto the
//! service context, awaited with a deadline, and unwrapped to text.
//!
//! ```no_run
//! # use std::{sync::Arc, time::Duration};
//! # fn demo(transport: Arc<dyn agenda_core::ToolTransport>) -> Result<(), agenda_core::AgendaError> {
//! use agenda_bridge::{ToolArgs, ToolBridge};
//!
//! let bridge = ToolBridge::connect(transport, Duration::from_secs(30))?;
//! let _text = bridge.call("get_weather", ToolArgs::new().arg("Taipei"))?;
//! # Ok(()) }
//! ```

pub mod binding;
pub mod http;
pub mod invocation;
pub mod service;
pub mod table;

use std::sync::Arc;
use std::time::Duration;

use agenda_core::{AgendaError, ToolTransport};
use tracing::info;

pub use binding::{ToolArgs, bind_arguments};
pub use http::HttpToolTransport;
pub use service::{ServiceContext, ServiceHandle};
pub use table::{BoundTool, ToolTable};

/// A running service context plus the tools discovered through it.
pub struct ToolBridge {
    tools: Vec<BoundTool>,
    service: ServiceContext,
}

impl ToolBridge {
    /// Starts a service context over `transport`, lists the remote tools,
    /// and binds a callable per tool. `timeout` bounds every call,
    /// discovery included.
    pub fn connect(transport: Arc<dyn ToolTransport>, timeout: Duration) -> Result<Self, AgendaError> {
        let service = ServiceContext::start(transport, timeout)?;
        let table = service.handle().discover()?;
        let tools = table.bind(&service.handle());
        info!(count = tools.len(), "tools discovered");
        Ok(Self { tools, service })
    }

    pub fn tools(&self) -> &[BoundTool] {
        &self.tools
    }

    pub fn tool(&self, name: &str) -> Option<&BoundTool> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// Calls a tool by name.
    pub fn call(&self, name: &str, args: ToolArgs) -> Result<String, AgendaError> {
        self.tool(name)
            .ok_or_else(|| AgendaError::UnknownTool(name.to_string()))?
            .call(args)
    }

    pub fn service(&self) -> &ServiceContext {
        &self.service
    }
}
