// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared by every Agenda crate.

use std::time::Duration;

use thiserror::Error;

/// The primary error type used across the scheduling engine, the calendar
/// dispatcher, and the tool invocation bridge.
#[derive(Debug, Error)]
pub enum AgendaError {
    /// Configuration errors (invalid TOML, bad values, unreadable files).
    #[error("configuration error: {0}")]
    Config(String),

    /// One or more required parameters were absent. Always lists every
    /// missing name, never just the first.
    #[error("missing required parameters: {}", names.join(", "))]
    MissingParameter { operation: String, names: Vec<String> },

    /// A timestamp or date string failed to parse.
    #[error("invalid date format `{value}`: {reason}")]
    InvalidDateFormat { value: String, reason: String },

    /// The calendar dispatcher received an operation name it does not know.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// An argument was present but unusable (wrong type, out of range).
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: String, reason: String },

    /// A calendar or provider collaborator returned non-success or failed.
    #[error("{service} error: {message}")]
    ExternalService {
        service: String,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A bridged tool call exceeded its deadline.
    #[error("tool call timed out after {after:?}: {tool}")]
    ToolInvocationTimeout { tool: String, after: Duration },

    /// A bridged tool call returned zero content elements.
    #[error("tool returned no content: {tool}")]
    EmptyToolResponse { tool: String },

    /// No tool with this name is registered.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// The remote tool protocol failed (disconnect, bad status, bad body).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AgendaError {
    /// Shorthand for an [`AgendaError::ExternalService`] without a source.
    pub fn external(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExternalService {
            service: service.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for an [`AgendaError::Transport`] without a source.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true for the errors that mean the tool subsystem itself is
    /// unavailable. These are the only ones surfaced to the agent as faults.
    pub fn is_bridge_fault(&self) -> bool {
        matches!(
            self,
            Self::ToolInvocationTimeout { .. } | Self::EmptyToolResponse { .. } | Self::Transport { .. }
        )
    }
}
