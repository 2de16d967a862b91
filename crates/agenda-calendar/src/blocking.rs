// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter for calendar clients that block the calling thread.
//!
//! Tool bodies run cooperatively on the service runtime. A synchronous SDK
//! called inline there would stall every other pending tool call and make
//! the bridge timeout meaningless, so [`Offloaded`] runs each call on the
//! blocking worker pool instead.

use std::sync::Arc;

use agenda_core::AgendaError;
use agenda_schedule::{TimeInterval, Window};
use async_trait::async_trait;

use crate::backend::{CalendarBackend, CalendarEvent, CreatedEvent, NewEvent};

/// Synchronous twin of [`CalendarBackend`].
pub trait BlockingCalendarBackend: Send + Sync + 'static {
    fn list_events(&self, calendar_id: &str, window: &Window)
    -> Result<Vec<CalendarEvent>, AgendaError>;

    fn free_busy(
        &self,
        calendar_id: &str,
        window: &Window,
        timezone: &str,
    ) -> Result<Vec<TimeInterval>, AgendaError>;

    fn insert_event(&self, calendar_id: &str, event: &NewEvent)
    -> Result<CreatedEvent, AgendaError>;
}

/// Runs a [`BlockingCalendarBackend`] on `spawn_blocking` threads.
pub struct Offloaded<B> {
    inner: Arc<B>,
}

impl<B: BlockingCalendarBackend> Offloaded<B> {
    pub fn new(inner: B) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }
}

async fn offload<T, F>(call: F) -> Result<T, AgendaError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, AgendaError> + Send + 'static,
{
    tokio::task::spawn_blocking(call)
        .await
        .map_err(|e| AgendaError::Internal(format!("blocking calendar call failed: {e}")))?
}

#[async_trait]
impl<B: BlockingCalendarBackend> CalendarBackend for Offloaded<B> {
    async fn list_events(
        &self,
        calendar_id: &str,
        window: &Window,
    ) -> Result<Vec<CalendarEvent>, AgendaError> {
        let inner = Arc::clone(&self.inner);
        let calendar_id = calendar_id.to_owned();
        let window = *window;
        offload(move || inner.list_events(&calendar_id, &window)).await
    }

    async fn free_busy(
        &self,
        calendar_id: &str,
        window: &Window,
        timezone: &str,
    ) -> Result<Vec<TimeInterval>, AgendaError> {
        let inner = Arc::clone(&self.inner);
        let calendar_id = calendar_id.to_owned();
        let timezone = timezone.to_owned();
        let window = *window;
        offload(move || inner.free_busy(&calendar_id, &window, &timezone)).await
    }

    async fn insert_event(
        &self,
        calendar_id: &str,
        event: &NewEvent,
    ) -> Result<CreatedEvent, AgendaError> {
        let inner = Arc::clone(&self.inner);
        let calendar_id = calendar_id.to_owned();
        let event = event.clone();
        offload(move || inner.insert_event(&calendar_id, &event)).await
    }
}
