// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Calendar side of the Agenda tool bridge.
//!
//! [`CalendarBackend`] is the seam to the external calendar provider.
//! [`GoogleCalendar`] talks to the Google Calendar REST API, [`Offloaded`]
//! adapts synchronous SDKs onto the blocking pool, and
//! [`CalendarDispatcher`] routes the four named operations onto the
//! scheduling engine.

pub mod backend;
pub mod blocking;
pub mod dispatcher;
pub mod google;

pub use backend::{CalendarBackend, CalendarEvent, CreatedEvent, NewEvent};
pub use blocking::{BlockingCalendarBackend, Offloaded};
pub use dispatcher::{CalendarDispatcher, CalendarRequest, CalendarSettings, Operation};
pub use google::GoogleCalendar;
