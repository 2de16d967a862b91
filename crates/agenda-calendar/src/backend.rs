// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The calendar collaborator contract.

use agenda_core::AgendaError;
use agenda_schedule::{TimeInterval, Timestamp, Window};
use async_trait::async_trait;

/// One event as returned by a range listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    /// Start as the provider reported it: a timestamp, or a bare date for
    /// all-day events.
    pub start: String,
    pub summary: String,
}

/// An event to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub summary: String,
    pub description: String,
    pub start: Timestamp,
    pub end: Timestamp,
    /// IANA zone name sent alongside both ends.
    pub timezone: String,
}

/// Reference to a created event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedEvent {
    pub link: String,
}

/// Operations consumed from the external calendar provider.
///
/// Implementations are shared process-wide behind an `Arc` and must not
/// hold per-call state. Blocking SDKs go through
/// [`Offloaded`](crate::blocking::Offloaded) instead of implementing this
/// directly.
#[async_trait]
pub trait CalendarBackend: Send + Sync {
    /// Events overlapping `window`, ordered by start time.
    async fn list_events(
        &self,
        calendar_id: &str,
        window: &Window,
    ) -> Result<Vec<CalendarEvent>, AgendaError>;

    /// Busy intervals inside `window`.
    async fn free_busy(
        &self,
        calendar_id: &str,
        window: &Window,
        timezone: &str,
    ) -> Result<Vec<TimeInterval>, AgendaError>;

    async fn insert_event(
        &self,
        calendar_id: &str,
        event: &NewEvent,
    ) -> Result<CreatedEvent, AgendaError>;
}
