// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Maps caller arguments onto a tool's declared parameters.

use agenda_core::{ToolArguments, ToolDescriptor};
use serde_json::Value;
use tracing::warn;

/// Arguments as a caller supplies them: positional, keyword, or both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArgs {
    pub positional: Vec<Value>,
    pub keyword: ToolArguments,
}

impl ToolArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Sets a keyword argument.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.insert(name.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }
}

impl From<ToolArguments> for ToolArgs {
    fn from(keyword: ToolArguments) -> Self {
        Self {
            positional: Vec::new(),
            keyword,
        }
    }
}

/// Builds the argument map sent for one call to `tool`.
///
/// Positional values map onto `parameter_names` by index only when they are
/// the sole arguments and their count matches the declaration exactly.
/// Otherwise the keyword map is used verbatim and positional values are
/// dropped. Every declared parameter still missing afterwards is sent as
/// `null`, so the remote side always sees the full parameter set.
pub fn bind_arguments(tool: &ToolDescriptor, args: ToolArgs) -> ToolArguments {
    let params = &tool.parameter_names;
    let ToolArgs { positional, keyword } = args;

    let mut bound = if keyword.is_empty() && !positional.is_empty() && positional.len() == params.len() {
        params.iter().cloned().zip(positional).collect()
    } else {
        if !positional.is_empty() {
            warn!(
                tool = tool.name.as_str(),
                given = positional.len(),
                declared = params.len(),
                with_keywords = !keyword.is_empty(),
                "positional arguments discarded"
            );
        }
        keyword
    };

    for name in params {
        bound.entry(name.clone()).or_insert(Value::Null);
    }
    bound
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tool(params: &[&str]) -> ToolDescriptor {
        ToolDescriptor {
            name: "convert_currency".into(),
            description: String::new(),
            parameter_names: params.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn positional_maps_by_index() {
        let bound = bind_arguments(
            &tool(&["amount", "from_currency", "to_currency"]),
            ToolArgs::new().arg(100).arg("USD").arg("TWD"),
        );
        assert_eq!(
            serde_json::Value::Object(bound),
            json!({"amount": 100, "from_currency": "USD", "to_currency": "TWD"})
        );
    }

    #[test]
    fn single_positional_against_single_parameter() {
        let bound = bind_arguments(&tool(&["city"]), ToolArgs::new().arg("Taipei"));
        assert_eq!(bound["city"], "Taipei");
    }

    #[test]
    fn keywords_pass_verbatim_and_gaps_become_null() {
        let bound = bind_arguments(
            &tool(&["amount", "from_currency", "to_currency"]),
            ToolArgs::new().kwarg("amount", 5).kwarg("extra", true),
        );
        assert_eq!(bound["amount"], 5);
        assert_eq!(bound["extra"], true);
        assert!(bound["from_currency"].is_null());
        assert!(bound["to_currency"].is_null());
        assert_eq!(bound.len(), 4);
    }

    #[test]
    fn positional_count_mismatch_is_discarded() {
        let bound = bind_arguments(&tool(&["a", "b"]), ToolArgs::new().arg(1));
        assert_eq!(serde_json::Value::Object(bound), json!({"a": null, "b": null}));
    }

    #[test]
    fn mixed_arguments_prefer_keywords() {
        let bound = bind_arguments(&tool(&["a", "b"]), ToolArgs::new().arg(1).arg(2).kwarg("b", 3));
        assert_eq!(serde_json::Value::Object(bound), json!({"b": 3, "a": null}));
    }

    #[test]
    fn no_arguments_and_no_parameters() {
        assert!(bind_arguments(&tool(&[]), ToolArgs::new()).is_empty());
    }
}
