// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `google_calendar` tool: one entry point for all calendar operations.

use agenda_calendar::{CalendarDispatcher, CalendarRequest};
use agenda_core::AgendaError;
use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::tool::{Tool, ToolOutput};

const NAME: &str = "google_calendar";

pub struct GoogleCalendarTool {
    dispatcher: CalendarDispatcher,
}

impl GoogleCalendarTool {
    pub fn new(dispatcher: CalendarDispatcher) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl Tool for GoogleCalendarTool {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Google Calendar operations: list_events, find_free_slots, add_event, auto_schedule. \
         Parameters: operation (str, required), time_min (str, ISO8601), time_max (str, ISO8601), \
         duration (int, minutes), title (str), start (str, ISO8601), end (str, ISO8601), \
         description (str), timezone (str, IANA name), events (list of {title, duration_min}), \
         date (str, YYYY-MM-DD; expands to the whole day when time_min/time_max are absent)."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "operation": {
                    "type": "string",
                    "enum": ["list_events", "find_free_slots", "add_event", "auto_schedule"]
                },
                "time_min": { "type": "string", "format": "date-time" },
                "time_max": { "type": "string", "format": "date-time" },
                "duration": { "type": "integer", "description": "Minimum slot length in minutes" },
                "title": { "type": "string" },
                "start": { "type": "string", "format": "date-time" },
                "end": { "type": "string", "format": "date-time" },
                "description": { "type": "string" },
                "timezone": { "type": "string", "description": "IANA zone name" },
                "events": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "duration_min": { "type": "integer" }
                        },
                        "required": ["title"]
                    }
                },
                "date": { "type": "string", "format": "date" }
            },
            "required": ["operation"]
        })
    }

    async fn invoke(&self, input: Value) -> Result<ToolOutput, AgendaError> {
        let Value::Object(arguments) = input else {
            return Ok(ToolOutput::failure(
                NAME,
                &AgendaError::InvalidArgument {
                    name: "arguments".into(),
                    reason: "expected an object".into(),
                },
            ));
        };

        let request = match CalendarRequest::from_arguments(&arguments) {
            Ok(request) => request,
            Err(err) => return Ok(ToolOutput::failure(NAME, &err)),
        };

        Ok(match self.dispatcher.dispatch(&request).await {
            Ok(text) => ToolOutput::success(text),
            Err(err) => {
                warn!(error = %err, "calendar operation failed");
                ToolOutput {
                    content: CalendarDispatcher::failure_text(&request, &err),
                    is_error: true,
                }
            }
        })
    }
}
