// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Agenda tool bridge.
//!
//! Holds the error taxonomy every other crate reports through, the wire
//! types of the remote tool protocol, and the [`ToolTransport`] seam that
//! the invocation bridge drives.

pub mod error;
pub mod traits;
pub mod types;

pub use error::AgendaError;
pub use traits::ToolTransport;
pub use types::{ContentItem, ToolArguments, ToolCall, ToolDescriptor, ToolResponse};
