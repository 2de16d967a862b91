// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in tools.
//!
//! Every tool answers with text, including on failure: missing arguments,
//! unset API keys, and provider errors all come back as a `ToolOutput`
//! flagged `is_error` and prefixed with the tool name.

pub mod activity;
pub mod attractions;
pub mod calendar;
pub mod clock;
pub mod currency;
pub mod http;
pub mod news;
pub mod weather;

pub use activity::SuggestActivityTool;
pub use attractions::AttractionsTool;
pub use calendar::GoogleCalendarTool;
pub use clock::ClockTool;
pub use currency::CurrencyTool;
pub use http::ProviderClient;
pub use news::NewsTool;
pub use weather::WeatherTool;

use std::sync::Arc;

use agenda_calendar::{CalendarBackend, CalendarDispatcher, CalendarSettings};
use agenda_config::AgendaConfig;
use agenda_core::AgendaError;
use serde_json::Value;

use crate::ToolRegistry;

/// Registers all built-in tools. `calendar` is the calendar collaborator
/// shared by every calendar operation.
pub fn register_builtins(
    registry: &mut ToolRegistry,
    config: &AgendaConfig,
    calendar: Arc<dyn CalendarBackend>,
) -> Result<(), AgendaError> {
    let client = ProviderClient::new()?;
    let settings = CalendarSettings::from_config(&config.calendar)?;
    let providers = &config.providers;

    registry.register(Arc::new(GoogleCalendarTool::new(CalendarDispatcher::new(
        calendar, settings,
    ))));
    registry.register(Arc::new(WeatherTool::new(client.clone(), providers)));
    registry.register(Arc::new(CurrencyTool::new(client.clone(), providers)));
    registry.register(Arc::new(NewsTool::new(client.clone(), providers)));
    registry.register(Arc::new(SuggestActivityTool));
    registry.register(Arc::new(ClockTool::new(config.calendar.tz()?)));
    registry.register(Arc::new(AttractionsTool::new(client, providers)));
    Ok(())
}

/// Fetches every named argument, reporting all missing ones together.
/// `null` and blank strings count as missing.
pub(crate) fn require<'a>(
    tool: &str,
    input: &'a Value,
    names: &[&str],
) -> Result<Vec<&'a Value>, AgendaError> {
    let mut found = Vec::with_capacity(names.len());
    let mut missing = Vec::new();
    for name in names {
        match input.get(*name) {
            None | Some(Value::Null) => missing.push((*name).to_string()),
            Some(Value::String(s)) if s.trim().is_empty() => missing.push((*name).to_string()),
            Some(value) => found.push(value),
        }
    }
    if missing.is_empty() {
        Ok(found)
    } else {
        Err(AgendaError::MissingParameter {
            operation: tool.to_string(),
            names: missing,
        })
    }
}

/// Text of a string or number argument.
pub(crate) fn text_arg(name: &str, value: &Value) -> Result<String, AgendaError> {
    match value {
        Value::String(s) => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(AgendaError::InvalidArgument {
            name: name.into(),
            reason: format!("expected text, got {other}"),
        }),
    }
}

/// A number, or a string holding one.
pub(crate) fn number_arg(name: &str, value: &Value) -> Result<f64, AgendaError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| AgendaError::InvalidArgument {
        name: name.into(),
        reason: format!("expected a number, got {value}"),
    })
}

/// The configured key, or a configuration error naming the setting.
pub(crate) fn api_key<'a>(key: &'a Option<String>, setting: &str) -> Result<&'a str, AgendaError> {
    key.as_deref()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| AgendaError::Config(format!("providers.{setting} is not set")))
}
