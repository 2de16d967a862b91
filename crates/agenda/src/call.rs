// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `agenda tools` and `agenda call`: synchronous use of the bridge.

use std::sync::Arc;

use agenda_bridge::{HttpToolTransport, ToolArgs, ToolBridge};
use agenda_config::AgendaConfig;
use agenda_core::{AgendaError, ToolTransport};
use serde_json::Value;

use crate::serve::build_transport;

/// Connects a bridge to the configured server, or to an in-process
/// registry when `local` is set.
fn connect(config: &AgendaConfig, local: bool) -> Result<ToolBridge, AgendaError> {
    let transport: Arc<dyn ToolTransport> = if local {
        build_transport(config)?
    } else {
        Arc::new(HttpToolTransport::from_config(&config.bridge)?)
    };
    ToolBridge::connect(transport, config.bridge.timeout())
}

pub fn list_tools(config: &AgendaConfig, local: bool) -> Result<(), AgendaError> {
    let bridge = connect(config, local)?;
    for tool in bridge.tools() {
        println!("{}({})", tool.name(), tool.parameter_names().join(", "));
        if !tool.description().is_empty() {
            println!("    {}", tool.description());
        }
    }
    Ok(())
}

pub fn call_tool(config: &AgendaConfig, local: bool, tool: &str, args: &[String]) -> Result<(), AgendaError> {
    let bridge = connect(config, local)?;
    let text = bridge.call(tool, parse_args(args))?;
    println!("{text}");
    Ok(())
}

/// Splits command-line arguments into keyword (`name=value`) and positional
/// values. Objects and arrays are decoded as JSON; everything else stays a
/// string, and the tools read numbers out of numeric strings themselves.
pub fn parse_args(args: &[String]) -> ToolArgs {
    args.iter().fold(ToolArgs::new(), |acc, raw| match raw.split_once('=') {
        Some((name, value)) if is_parameter_name(name) => acc.kwarg(name, parse_value(value)),
        _ => acc.arg(parse_value(raw)),
    })
}

fn is_parameter_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_value(raw: &str) -> Value {
    raw.trim_start()
        .starts_with(['{', '['])
        .then(|| serde_json::from_str(raw).ok())
        .flatten()
        .unwrap_or_else(|| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn keyword_and_positional_split() {
        let args = parse_args(&strings(&["operation=find_free_slots", "duration=30", "Taipei"]));
        assert_eq!(args.keyword["operation"], "find_free_slots");
        assert_eq!(args.keyword["duration"], "30");
        assert_eq!(args.positional, [json!("Taipei")]);
    }

    #[test]
    fn json_values_are_structured() {
        let args = parse_args(&strings(&[r#"events=[{"title":"Gym","duration_min":45}]"#]));
        assert_eq!(args.keyword["events"][0]["duration_min"], 45);
    }

    #[test]
    fn scalars_that_look_like_json_stay_strings() {
        let args = parse_args(&strings(&["title=2025", "summary=true", "note=null", "1e3"]));
        assert_eq!(args.keyword["title"], "2025");
        assert_eq!(args.keyword["summary"], "true");
        assert_eq!(args.keyword["note"], "null");
        assert_eq!(args.positional, [json!("1e3")]);
    }

    #[test]
    fn malformed_structures_fall_back_to_text() {
        let args = parse_args(&strings(&["events=[not json"]));
        assert_eq!(args.keyword["events"], "[not json");
    }

    #[test]
    fn timestamps_stay_strings() {
        let args = parse_args(&strings(&["time_min=2025-07-18T09:00:00+08:00"]));
        assert_eq!(args.keyword["time_min"], "2025-07-18T09:00:00+08:00");
    }

    #[test]
    fn equals_inside_a_value_is_positional() {
        let args = parse_args(&strings(&["a+b=c"]));
        assert!(args.keyword.is_empty());
        assert_eq!(args.positional, [json!("a+b=c")]);
    }
}
