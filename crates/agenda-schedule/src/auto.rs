// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Greedy auto-scheduler.
//!
//! Requests are placed strictly in input order at the earliest cursor
//! position with room before the next busy interval. Placed events are not
//! fed back into the busy list, and placements are not checked against the
//! window end; the cursor only ever moves forward, which is what keeps
//! placements from the same run from overlapping each other.

use agenda_core::AgendaError;
use chrono::TimeDelta;
use tracing::warn;

use crate::interval::{TimeInterval, Timestamp, Window, format_timestamp};

/// One task to place: a title and a positive duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRequest {
    pub title: String,
    duration: TimeDelta,
}

impl ScheduleRequest {
    pub fn new(title: impl Into<String>, duration_minutes: i64) -> Result<Self, AgendaError> {
        let title = title.into();
        if duration_minutes <= 0 {
            return Err(AgendaError::InvalidArgument {
                name: "duration_min".into(),
                reason: format!("`{title}` needs a positive duration, got {duration_minutes}"),
            });
        }
        let duration = TimeDelta::try_minutes(duration_minutes).ok_or_else(|| {
            AgendaError::InvalidArgument {
                name: "duration_min".into(),
                reason: format!("`{title}` has an out-of-range duration of {duration_minutes} minutes"),
            }
        })?;
        Ok(Self { title, duration })
    }

    pub fn duration(&self) -> TimeDelta {
        self.duration
    }
}

/// A request after placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledEvent {
    pub title: String,
    pub start: Timestamp,
    pub end: Timestamp,
}

impl ScheduledEvent {
    pub fn interval(&self) -> TimeInterval {
        TimeInterval {
            start: self.start,
            end: self.end,
        }
    }
}

impl std::fmt::Display for ScheduledEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} - {}",
            self.title,
            format_timestamp(&self.start),
            format_timestamp(&self.end)
        )
    }
}

/// Plans a placement for every request. Never reports "no room"; fails only
/// when a placement would end beyond the representable time range.
pub fn plan_schedule(
    window: &Window,
    busy: &[TimeInterval],
    requests: &[ScheduleRequest],
) -> Result<Vec<ScheduledEvent>, AgendaError> {
    let offset = window.offset();
    let mut busy: Vec<TimeInterval> = busy.iter().map(|b| b.with_offset(&offset)).collect();
    busy.sort();

    let mut cursor = window.time_min();
    let mut placed = Vec::with_capacity(requests.len());

    for request in requests {
        for b in &busy {
            if b.start - cursor >= request.duration {
                break;
            }
            cursor = cursor.max(b.end);
        }

        let end = cursor
            .checked_add_signed(request.duration)
            .ok_or_else(|| AgendaError::InvalidArgument {
                name: "duration_min".into(),
                reason: format!(
                    "`{}` would end beyond the supported date range",
                    request.title
                ),
            })?;
        if end > window.time_max() {
            warn!(
                title = request.title.as_str(),
                end = %format_timestamp(&end),
                time_max = %format_timestamp(&window.time_max()),
                "placement runs past the end of the window"
            );
        }
        placed.push(ScheduledEvent {
            title: request.title.clone(),
            start: cursor,
            end,
        });
        cursor = end;
    }

    Ok(placed)
}
