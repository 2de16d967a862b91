// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interval-based scheduling engine.
//!
//! Everything here is pure and synchronous: busy lists come in from the
//! calendar collaborator, free slots and planned placements go out, and
//! nothing is retained between calls.
//!
//! - [`interval`] -- half-open [`TimeInterval`] and the query [`Window`]
//! - [`window`] -- expands a bare date into a full-day window
//! - [`free_slots`] -- complement of a busy list within a window
//! - [`auto`] -- greedy placement of an ordered batch of requests

pub mod auto;
pub mod free_slots;
pub mod interval;
pub mod window;

pub use auto::{ScheduleRequest, ScheduledEvent, plan_schedule};
pub use free_slots::find_free_slots;
pub use interval::{TimeInterval, Timestamp, Window, format_timestamp, parse_timestamp};
pub use window::resolve_window;
