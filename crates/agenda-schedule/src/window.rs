// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Window resolution: explicit bounds, or a whole calendar day.

use agenda_core::AgendaError;
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;
use tracing::debug;

use crate::interval::{Timestamp, Window, parse_timestamp};

/// Resolves the query window for a calendar operation.
///
/// Explicit `time_min`/`time_max` win when both are present. Otherwise `date`
/// expands to `[midnight, next midnight)`: in the date's own offset when it
/// carries one, else in `tz`. Empty strings count as absent.
pub fn resolve_window(
    time_min: Option<&str>,
    time_max: Option<&str>,
    date: Option<&str>,
    tz: Tz,
) -> Result<Window, AgendaError> {
    let time_min = present(time_min);
    let time_max = present(time_max);

    if let (Some(min), Some(max)) = (time_min, time_max) {
        return Window::new(parse_timestamp(min)?, parse_timestamp(max)?);
    }

    if let Some(date) = present(date) {
        let window = day_window(date, tz)?;
        debug!(
            date,
            time_min = %window.time_min(),
            time_max = %window.time_max(),
            "expanded date into full-day window"
        );
        return Ok(window);
    }

    let mut names = Vec::new();
    if time_min.is_none() {
        names.push("time_min".to_string());
    }
    if time_max.is_none() {
        names.push("time_max".to_string());
    }
    Err(AgendaError::MissingParameter {
        operation: "window".into(),
        names,
    })
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn day_window(date: &str, tz: Tz) -> Result<Window, AgendaError> {
    if let Ok(ts) = parse_timestamp(date) {
        let offset = *ts.offset();
        let midnight = ts.date_naive().and_time(NaiveTime::MIN);
        let start = offset
            .from_local_datetime(&midnight)
            .single()
            .ok_or_else(|| invalid(date, "no local midnight for this offset"))?;
        let end = start
            .checked_add_signed(chrono::TimeDelta::days(1))
            .ok_or_else(|| invalid(date, "date out of range"))?;
        return Window::new(start, end);
    }

    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()))
        .map_err(|e| invalid(date, &e.to_string()))?;
    let next = day
        .checked_add_days(Days::new(1))
        .ok_or_else(|| invalid(date, "date out of range"))?;
    Window::new(local_midnight(day, tz, date)?, local_midnight(next, tz, date)?)
}

/// Midnight of `day` in `tz`. Where a DST jump skips midnight, the earliest
/// valid instant of that day is used.
fn local_midnight(day: NaiveDate, tz: Tz, raw: &str) -> Result<Timestamp, AgendaError> {
    let midnight = day.and_time(NaiveTime::MIN);
    let resolved = tz.from_local_datetime(&midnight).earliest().or_else(|| {
        tz.from_local_datetime(&(midnight + chrono::TimeDelta::hours(1)))
            .earliest()
    });
    resolved
        .map(|dt| dt.fixed_offset())
        .ok_or_else(|| invalid(raw, &format!("no local midnight in {tz}")))
}

fn invalid(value: &str, reason: &str) -> AgendaError {
    AgendaError::InvalidDateFormat {
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
