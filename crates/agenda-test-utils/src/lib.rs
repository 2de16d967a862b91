// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Agenda integration tests.
//!
//! - [`MockCalendar`] - scripted calendar collaborator that records inserts
//! - [`MockTransport`] - scripted tool registry with hangs, empty replies,
//!   and disconnects on demand
//! - [`TestHarness`] - the full built-in tool stack over a mock calendar

pub mod harness;
pub mod mock_calendar;
pub mod mock_transport;

pub use harness::TestHarness;
pub use mock_calendar::MockCalendar;
pub use mock_transport::{Behavior, MockTransport};
