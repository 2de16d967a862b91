// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tools exposed to the agent.
//!
//! [`Tool`] is the unified interface, [`ToolRegistry`] keeps tools in
//! registration order and derives their descriptors, [`builtin`] holds the
//! calendar and information tools, and [`RegistryTransport`] serves a
//! registry through the [`ToolTransport`](agenda_core::ToolTransport)
//! primitives without a network hop.

pub mod builtin;
pub mod tool;
pub mod transport;

pub use tool::{Tool, ToolOutput, ToolRegistry};
pub use transport::RegistryTransport;
