// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Half-open time intervals and query windows.
//!
//! Timestamps are ISO-8601 with an explicit offset. A trailing `Z` is
//! accepted and treated as `+00:00`.

use std::cmp::Ordering;
use std::fmt;

use agenda_core::AgendaError;
use chrono::{DateTime, FixedOffset, SecondsFormat, TimeDelta};

/// A point in time carrying the offset it was written with.
pub type Timestamp = DateTime<FixedOffset>;

/// Parses an ISO-8601 timestamp with an explicit offset.
pub fn parse_timestamp(value: &str) -> Result<Timestamp, AgendaError> {
    let trimmed = value.trim();
    let normalized = match trimmed
        .strip_suffix('Z')
        .or_else(|| trimmed.strip_suffix('z'))
    {
        Some(head) => format!("{head}+00:00"),
        None => trimmed.to_string(),
    };
    DateTime::parse_from_rfc3339(&normalized).map_err(|e| AgendaError::InvalidDateFormat {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Formats a timestamp as `YYYY-MM-DDTHH:MM:SS+HH:MM`.
pub fn format_timestamp(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

/// A half-open range `[start, end)` with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeInterval {
    pub(crate) start: Timestamp,
    pub(crate) end: Timestamp,
}

impl TimeInterval {
    /// Creates an interval, rejecting empty or inverted ranges.
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, AgendaError> {
        if start >= end {
            return Err(AgendaError::InvalidArgument {
                name: "end".into(),
                reason: format!(
                    "interval end {} must be after start {}",
                    format_timestamp(&end),
                    format_timestamp(&start)
                ),
            });
        }
        Ok(Self { start, end })
    }

    /// Parses both ends with [`parse_timestamp`].
    pub fn parse(start: &str, end: &str) -> Result<Self, AgendaError> {
        Self::new(parse_timestamp(start)?, parse_timestamp(end)?)
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// True when the two ranges share at least one instant.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True when `other` lies entirely inside `self`.
    pub fn contains(&self, other: &TimeInterval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// The same instants expressed in `offset`.
    pub fn with_offset(&self, offset: &FixedOffset) -> Self {
        Self {
            start: self.start.with_timezone(offset),
            end: self.end.with_timezone(offset),
        }
    }

    /// The part of `self` inside `window`, expressed in the window's offset.
    pub fn clip_to(&self, window: &Window) -> Option<Self> {
        let bounds = window.as_interval();
        if !self.overlaps(&bounds) {
            return None;
        }
        let offset = window.offset();
        Some(Self {
            start: self.start.max(bounds.start).with_timezone(&offset),
            end: self.end.min(bounds.end).with_timezone(&offset),
        })
    }
}

impl Ord for TimeInterval {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| self.end.cmp(&other.end))
    }
}

impl PartialOrd for TimeInterval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            format_timestamp(&self.start),
            format_timestamp(&self.end)
        )
    }
}

/// The horizon of a calendar query: `[time_min, time_max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    time_min: Timestamp,
    time_max: Timestamp,
}

impl Window {
    /// Creates a window, requiring `time_min < time_max`.
    pub fn new(time_min: Timestamp, time_max: Timestamp) -> Result<Self, AgendaError> {
        if time_min >= time_max {
            return Err(AgendaError::InvalidArgument {
                name: "time_max".into(),
                reason: format!(
                    "{} is not after time_min {}",
                    format_timestamp(&time_max),
                    format_timestamp(&time_min)
                ),
            });
        }
        Ok(Self { time_min, time_max })
    }

    pub fn time_min(&self) -> Timestamp {
        self.time_min
    }

    pub fn time_max(&self) -> Timestamp {
        self.time_max
    }

    /// Offset used to express results computed against this window.
    pub fn offset(&self) -> FixedOffset {
        *self.time_min.offset()
    }

    pub fn as_interval(&self) -> TimeInterval {
        TimeInterval {
            start: self.time_min,
            end: self.time_max,
        }
    }
}
