// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types of the remote tool protocol.

use serde::{Deserialize, Serialize};

/// Argument map sent with every tool call: parameter name to JSON value.
pub type ToolArguments = serde_json::Map<String, serde_json::Value>;

/// A tool as advertised by the remote registry.
///
/// Discovered once per bridge session and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Declared parameters, in declaration order.
    #[serde(default)]
    pub parameter_names: Vec<String>,
}

/// One element of a tool response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(rename = "type", default = "default_content_kind")]
    pub kind: String,
    #[serde(default)]
    pub text: String,
}

fn default_content_kind() -> String {
    "text".to_string()
}

impl ContentItem {
    /// Creates a text content element.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: default_content_kind(),
            text: text.into(),
        }
    }
}

/// Result of the "call tool" primitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResponse {
    #[serde(default)]
    pub content: Vec<ContentItem>,
    /// Set when the tool reported an operational failure in its text.
    #[serde(default, rename = "isError")]
    pub is_error: bool,
}

impl ToolResponse {
    /// A single-element text response.
    pub fn text(text: impl Into<String>, is_error: bool) -> Self {
        Self {
            content: vec![ContentItem::text(text)],
            is_error,
        }
    }

    /// Text payload of the first content element, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().map(|c| c.text.as_str())
    }
}

/// Body of a "call tool" request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub arguments: ToolArguments,
}
