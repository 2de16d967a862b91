// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock calendar collaborator for deterministic tests.

use std::sync::Arc;

use agenda_calendar::{CalendarBackend, CalendarEvent, CreatedEvent, NewEvent};
use agenda_core::AgendaError;
use agenda_schedule::{TimeInterval, Window};
use async_trait::async_trait;
use tokio::sync::Mutex;

#[derive(Default)]
struct State {
    busy: Vec<TimeInterval>,
    events: Vec<CalendarEvent>,
    inserted: Vec<NewEvent>,
    queried_windows: Vec<Window>,
    fail_inserts_after: Option<usize>,
}

/// A calendar whose busy list and event listing are fixed up front.
///
/// Inserted events are recorded but never merged into the busy list.
#[derive(Clone, Default)]
pub struct MockCalendar {
    state: Arc<Mutex<State>>,
}

impl MockCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds busy intervals given as `(start, end)` timestamps.
    ///
    /// # Panics
    ///
    /// On unparseable timestamps.
    pub fn with_busy(self, busy: &[(&str, &str)]) -> Self {
        let parsed: Vec<TimeInterval> = busy
            .iter()
            .map(|(s, e)| TimeInterval::parse(s, e).expect("valid busy interval"))
            .collect();
        self.state
            .try_lock()
            .expect("mock calendar is not shared yet")
            .busy
            .extend(parsed);
        self
    }

    pub fn with_events(self, events: &[(&str, &str)]) -> Self {
        self.state
            .try_lock()
            .expect("mock calendar is not shared yet")
            .events
            .extend(events.iter().map(|(start, summary)| CalendarEvent {
                start: start.to_string(),
                summary: summary.to_string(),
            }));
        self
    }

    /// Lets `n` inserts succeed, then fails every later one.
    pub fn failing_inserts_after(self, n: usize) -> Self {
        self.state
            .try_lock()
            .expect("mock calendar is not shared yet")
            .fail_inserts_after = Some(n);
        self
    }

    pub async fn inserted(&self) -> Vec<NewEvent> {
        self.state.lock().await.inserted.clone()
    }

    /// Windows passed to `list_events` and `free_busy`, in call order.
    pub async fn queried_windows(&self) -> Vec<Window> {
        self.state.lock().await.queried_windows.clone()
    }
}

#[async_trait]
impl CalendarBackend for MockCalendar {
    async fn list_events(
        &self,
        _calendar_id: &str,
        window: &Window,
    ) -> Result<Vec<CalendarEvent>, AgendaError> {
        let mut state = self.state.lock().await;
        state.queried_windows.push(*window);
        Ok(state.events.clone())
    }

    async fn free_busy(
        &self,
        _calendar_id: &str,
        window: &Window,
        _timezone: &str,
    ) -> Result<Vec<TimeInterval>, AgendaError> {
        let mut state = self.state.lock().await;
        state.queried_windows.push(*window);
        Ok(state.busy.clone())
    }

    async fn insert_event(
        &self,
        _calendar_id: &str,
        event: &NewEvent,
    ) -> Result<CreatedEvent, AgendaError> {
        let mut state = self.state.lock().await;
        if state.fail_inserts_after == Some(state.inserted.len()) {
            return Err(AgendaError::external("google_calendar", "mock insert failure"));
        }
        state.inserted.push(event.clone());
        Ok(CreatedEvent {
            link: format!("https://calendar.mock/event/{}", state.inserted.len()),
        })
    }
}
