// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Routes named calendar operations onto the scheduling engine.
//!
//! Every operation validates its own required parameters before any I/O and
//! reports all missing names at once. Results are plain text for the agent.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use agenda_config::model::CalendarConfig;
use agenda_core::{AgendaError, ToolArguments};
use agenda_schedule::{
    ScheduleRequest, TimeInterval, Window, find_free_slots, parse_timestamp, plan_schedule,
    resolve_window,
};
use chrono::TimeDelta;
use chrono_tz::Tz;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::backend::{CalendarBackend, NewEvent};

/// The four calendar operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListEvents,
    FindFreeSlots,
    AddEvent,
    AutoSchedule,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListEvents => "list_events",
            Self::FindFreeSlots => "find_free_slots",
            Self::AddEvent => "add_event",
            Self::AutoSchedule => "auto_schedule",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = AgendaError;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "list_events" => Ok(Self::ListEvents),
            "find_free_slots" => Ok(Self::FindFreeSlots),
            "add_event" => Ok(Self::AddEvent),
            "auto_schedule" => Ok(Self::AutoSchedule),
            _ => Err(AgendaError::UnknownOperation(s.to_string())),
        }
    }
}

/// Arguments of a `google_calendar` call, as the agent sends them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CalendarRequest {
    pub operation: Option<String>,
    pub time_min: Option<String>,
    pub time_max: Option<String>,
    /// Minutes. Numbers and numeric strings are both accepted.
    pub duration: Option<Value>,
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub description: Option<String>,
    pub timezone: Option<String>,
    /// Items of the form `{"title": .., "duration_min": ..}`.
    pub events: Option<Vec<Value>>,
    pub date: Option<String>,
}

impl CalendarRequest {
    /// Reads a request from a tool argument map. Explicit `null`s count as
    /// absent.
    pub fn from_arguments(arguments: &ToolArguments) -> Result<Self, AgendaError> {
        serde_json::from_value(Value::Object(arguments.clone())).map_err(|e| {
            AgendaError::InvalidArgument {
                name: "arguments".into(),
                reason: e.to_string(),
            }
        })
    }

    fn operation_name(&self) -> &str {
        self.operation.as_deref().map(str::trim).unwrap_or_default()
    }

    /// Names of every parameter `operation` needs but did not get.
    fn missing(&self, operation: Operation) -> Vec<String> {
        let mut missing = Vec::new();
        let mut need = |name: &str, present: bool| {
            if !present {
                missing.push(name.to_string());
            }
        };

        let has_date = filled(&self.date);
        match operation {
            Operation::ListEvents => {
                need("time_min", has_date || filled(&self.time_min));
                need("time_max", has_date || filled(&self.time_max));
            }
            Operation::FindFreeSlots => {
                need("time_min", has_date || filled(&self.time_min));
                need("time_max", has_date || filled(&self.time_max));
                need("duration", self.duration.as_ref().is_some_and(|d| !d.is_null()));
            }
            Operation::AddEvent => {
                need("title", filled(&self.title));
                need("start", filled(&self.start));
                need("end", filled(&self.end));
            }
            Operation::AutoSchedule => {
                need("time_min", has_date || filled(&self.time_min));
                need("time_max", has_date || filled(&self.time_max));
                need("events", self.events.as_ref().is_some_and(|e| !e.is_empty()));
            }
        }
        missing
    }
}

fn filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// Per-process calendar settings, fixed at startup.
#[derive(Debug, Clone)]
pub struct CalendarSettings {
    pub calendar_id: String,
    pub timezone: Tz,
    pub default_event_minutes: i64,
}

impl CalendarSettings {
    pub fn from_config(config: &CalendarConfig) -> Result<Self, AgendaError> {
        Ok(Self {
            calendar_id: config.calendar_id.clone(),
            timezone: config.tz()?,
            default_event_minutes: config.default_event_minutes,
        })
    }
}

/// Validates and executes calendar operations against a backend.
#[derive(Clone)]
pub struct CalendarDispatcher {
    backend: Arc<dyn CalendarBackend>,
    settings: CalendarSettings,
}

impl CalendarDispatcher {
    pub fn new(backend: Arc<dyn CalendarBackend>, settings: CalendarSettings) -> Self {
        Self { backend, settings }
    }

    pub fn settings(&self) -> &CalendarSettings {
        &self.settings
    }

    /// Runs one request and returns its result text.
    ///
    /// Failures are returned as errors; [`failure_text`](Self::failure_text)
    /// renders them for the agent.
    pub async fn dispatch(&self, request: &CalendarRequest) -> Result<String, AgendaError> {
        let name = request.operation_name();
        if name.is_empty() {
            return Err(AgendaError::MissingParameter {
                operation: String::new(),
                names: vec!["operation".into()],
            });
        }
        let operation: Operation = name.parse()?;

        let missing = request.missing(operation);
        if !missing.is_empty() {
            return Err(AgendaError::MissingParameter {
                operation: operation.to_string(),
                names: missing,
            });
        }

        let tz = self.request_timezone(request)?;
        debug!(operation = %operation, timezone = %tz, "dispatching calendar operation");

        match operation {
            Operation::ListEvents => self.list_events(request, tz).await,
            Operation::FindFreeSlots => self.find_free_slots(request, tz).await,
            Operation::AddEvent => self.add_event(request, tz).await,
            Operation::AutoSchedule => self.auto_schedule(request, tz).await,
        }
    }

    /// Renders a failure as `google_calendar <operation>: <error>`.
    pub fn failure_text(request: &CalendarRequest, err: &AgendaError) -> String {
        match request.operation_name() {
            "" => format!("google_calendar: {err}"),
            name => format!("google_calendar {name}: {err}"),
        }
    }

    fn request_timezone(&self, request: &CalendarRequest) -> Result<Tz, AgendaError> {
        match request.timezone.as_deref().map(str::trim) {
            None | Some("") => Ok(self.settings.timezone),
            Some(name) => name.parse::<Tz>().map_err(|e| AgendaError::InvalidArgument {
                name: "timezone".into(),
                reason: e.to_string(),
            }),
        }
    }

    fn window(&self, request: &CalendarRequest, tz: Tz) -> Result<Window, AgendaError> {
        resolve_window(
            request.time_min.as_deref(),
            request.time_max.as_deref(),
            request.date.as_deref(),
            tz,
        )
    }

    async fn busy(&self, window: &Window, tz: Tz) -> Result<Vec<TimeInterval>, AgendaError> {
        self.backend
            .free_busy(&self.settings.calendar_id, window, tz.name())
            .await
    }

    async fn list_events(&self, request: &CalendarRequest, tz: Tz) -> Result<String, AgendaError> {
        let window = self.window(request, tz)?;
        let events = self
            .backend
            .list_events(&self.settings.calendar_id, &window)
            .await?;

        if events.is_empty() {
            return Ok("No events in this period.".into());
        }
        Ok(events
            .iter()
            .map(|e| format!("- {}: {}", e.start, e.summary))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    async fn find_free_slots(
        &self,
        request: &CalendarRequest,
        tz: Tz,
    ) -> Result<String, AgendaError> {
        let minutes = positive_minutes("duration", request.duration.as_ref())?;
        let minutes = TimeDelta::try_minutes(minutes).ok_or_else(|| AgendaError::InvalidArgument {
            name: "duration".into(),
            reason: format!("{minutes} minutes is out of range"),
        })?;
        let window = self.window(request, tz)?;
        let busy = self.busy(&window, tz).await?;

        let slots = find_free_slots(&window, &busy, minutes);
        debug!(busy = busy.len(), slots = slots.len(), "free slots computed");

        if slots.is_empty() {
            return Ok("No free slots match the requested duration.".into());
        }
        Ok(slots
            .iter()
            .map(|slot| format!("Free: {slot}"))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    async fn add_event(&self, request: &CalendarRequest, tz: Tz) -> Result<String, AgendaError> {
        let interval = TimeInterval::new(
            parse_timestamp(request.start.as_deref().unwrap_or_default())?,
            parse_timestamp(request.end.as_deref().unwrap_or_default())?,
        )?;
        let event = NewEvent {
            summary: request.title.clone().unwrap_or_default(),
            description: request.description.clone().unwrap_or_default(),
            start: interval.start(),
            end: interval.end(),
            timezone: tz.name().to_string(),
        };

        let created = self
            .backend
            .insert_event(&self.settings.calendar_id, &event)
            .await?;
        info!(summary = event.summary.as_str(), "calendar event created");
        Ok(format!("Event created: {}", created.link))
    }

    async fn auto_schedule(&self, request: &CalendarRequest, tz: Tz) -> Result<String, AgendaError> {
        let requests = self.schedule_requests(request.events.as_deref().unwrap_or_default())?;
        let window = self.window(request, tz)?;
        let busy = self.busy(&window, tz).await?;

        let placed = plan_schedule(&window, &busy, &requests)?;

        for (created, event) in placed.iter().enumerate() {
            let new_event = NewEvent {
                summary: event.title.clone(),
                description: String::new(),
                start: event.start,
                end: event.end,
                timezone: tz.name().to_string(),
            };
            if let Err(err) = self
                .backend
                .insert_event(&self.settings.calendar_id, &new_event)
                .await
            {
                error!(
                    title = event.title.as_str(),
                    created,
                    total = placed.len(),
                    error = %err,
                    "auto-schedule aborted"
                );
                return Err(AgendaError::ExternalService {
                    service: "google_calendar".into(),
                    message: format!(
                        "creating `{}` failed after {created} of {} events were already created: {err}",
                        event.title,
                        placed.len()
                    ),
                    source: Some(Box::new(err)),
                });
            }
        }

        info!(count = placed.len(), "auto-schedule committed");
        let lines: Vec<String> = placed.iter().map(ToString::to_string).collect();
        Ok(format!("Auto-scheduled:\n{}", lines.join("\n")))
    }

    fn schedule_requests(&self, items: &[Value]) -> Result<Vec<ScheduleRequest>, AgendaError> {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let obj = item.as_object().ok_or_else(|| AgendaError::InvalidArgument {
                    name: format!("events[{i}]"),
                    reason: "expected an object with `title` and `duration_min`".into(),
                })?;
                let title = obj
                    .get("title")
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .ok_or_else(|| AgendaError::InvalidArgument {
                        name: format!("events[{i}].title"),
                        reason: "a non-empty title is required".into(),
                    })?;
                let minutes = match obj.get("duration_min").filter(|v| !v.is_null()) {
                    Some(value) => whole_number(value).ok_or_else(|| AgendaError::InvalidArgument {
                        name: format!("events[{i}].duration_min"),
                        reason: format!("expected a whole number of minutes, got {value}"),
                    })?,
                    None => self.settings.default_event_minutes,
                };
                ScheduleRequest::new(title, minutes)
            })
            .collect()
    }
}

/// Reads an integer from a JSON number or numeric string.
fn whole_number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn positive_minutes(name: &str, value: Option<&Value>) -> Result<i64, AgendaError> {
    let value = value.unwrap_or(&Value::Null);
    match whole_number(value) {
        Some(minutes) if minutes > 0 => Ok(minutes),
        _ => Err(AgendaError::InvalidArgument {
            name: name.into(),
            reason: format!("expected a positive number of minutes, got {value}"),
        }),
    }
}
