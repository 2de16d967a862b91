// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Free-slot finder: the complement of a busy list within a window.

use chrono::TimeDelta;

use crate::interval::{TimeInterval, Window};

/// Returns every gap in `window` not covered by `busy` that lasts at least
/// `min_duration`, in ascending order.
///
/// The busy list does not need to be sorted or disjoint: it is clipped to the
/// window and sorted first, and overlapping entries are absorbed by carrying
/// the furthest end seen so far. An empty result means nothing qualifies.
pub fn find_free_slots(
    window: &Window,
    busy: &[TimeInterval],
    min_duration: TimeDelta,
) -> Vec<TimeInterval> {
    let mut busy: Vec<TimeInterval> = busy.iter().filter_map(|b| b.clip_to(window)).collect();
    busy.sort();

    let mut slots = Vec::new();
    let mut cursor = window.time_min();

    for b in &busy {
        if b.start > cursor && b.start - cursor >= min_duration {
            slots.push(TimeInterval {
                start: cursor,
                end: b.start,
            });
        }
        cursor = cursor.max(b.end);
    }

    let end = window.time_max();
    if end > cursor && end - cursor >= min_duration {
        slots.push(TimeInterval { start: cursor, end });
    }

    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::{format_timestamp, parse_timestamp};
    use proptest::prelude::*;

    fn ts(s: &str) -> crate::Timestamp {
        parse_timestamp(s).unwrap()
    }

    fn day_window() -> Window {
        Window::new(ts("2025-07-19T09:00:00+08:00"), ts("2025-07-19T17:00:00+08:00")).unwrap()
    }

    fn busy(start: &str, end: &str) -> TimeInterval {
        TimeInterval::parse(start, end).unwrap()
    }

    fn render(slots: &[TimeInterval]) -> Vec<String> {
        slots.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_busy_list_yields_whole_window() {
        let slots = find_free_slots(&day_window(), &[], TimeDelta::minutes(60));
        assert_eq!(
            render(&slots),
            vec!["2025-07-19T09:00:00+08:00 to 2025-07-19T17:00:00+08:00"]
        );
    }

    #[test]
    fn gaps_shorter_than_duration_are_skipped() {
        let list = [
            busy("2025-07-19T09:30:00+08:00", "2025-07-19T12:00:00+08:00"),
            busy("2025-07-19T13:00:00+08:00", "2025-07-19T16:30:00+08:00"),
        ];
        let slots = find_free_slots(&day_window(), &list, TimeDelta::minutes(60));
        assert_eq!(
            render(&slots),
            vec!["2025-07-19T12:00:00+08:00 to 2025-07-19T13:00:00+08:00"]
        );
    }

    #[test]
    fn no_slot_is_an_empty_result() {
        let list = [busy("2025-07-19T08:00:00+08:00", "2025-07-19T18:00:00+08:00")];
        assert!(find_free_slots(&day_window(), &list, TimeDelta::minutes(15)).is_empty());
    }

    #[test]
    fn unsorted_and_overlapping_busy_is_tolerated() {
        let list = [
            busy("2025-07-19T14:00:00+08:00", "2025-07-19T15:00:00+08:00"),
            busy("2025-07-19T10:00:00+08:00", "2025-07-19T12:00:00+08:00"),
            busy("2025-07-19T11:00:00+08:00", "2025-07-19T11:30:00+08:00"),
        ];
        let slots = find_free_slots(&day_window(), &list, TimeDelta::minutes(30));
        assert_eq!(
            render(&slots),
            vec![
                "2025-07-19T09:00:00+08:00 to 2025-07-19T10:00:00+08:00",
                "2025-07-19T12:00:00+08:00 to 2025-07-19T14:00:00+08:00",
                "2025-07-19T15:00:00+08:00 to 2025-07-19T17:00:00+08:00",
            ]
        );
    }

    #[test]
    fn utc_busy_entries_are_reported_in_window_offset() {
        // 02:00-03:00Z is 10:00-11:00 in +08:00.
        let list = [busy("2025-07-19T02:00:00Z", "2025-07-19T03:00:00Z")];
        let slots = find_free_slots(&day_window(), &list, TimeDelta::minutes(60));
        assert_eq!(format_timestamp(&slots[0].end()), "2025-07-19T10:00:00+08:00");
        assert_eq!(format_timestamp(&slots[1].start()), "2025-07-19T11:00:00+08:00");
    }

    #[test]
    fn busy_past_window_end_does_not_stretch_slots() {
        let list = [busy("2025-07-19T18:00:00+08:00", "2025-07-19T19:00:00+08:00")];
        let slots = find_free_slots(&day_window(), &list, TimeDelta::minutes(60));
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].end(), day_window().time_max());
    }

    // Sorted, non-overlapping busy list as (gap before, length) pairs in minutes.
    fn busy_strategy() -> impl Strategy<Value = Vec<(i64, i64)>> {
        prop::collection::vec((0i64..120, 1i64..120), 0..12)
    }

    const WINDOW_MINUTES: i64 = 24 * 60;

    fn build(pairs: &[(i64, i64)]) -> (Window, Vec<TimeInterval>) {
        let base = ts("2025-07-18T00:00:00+08:00");
        let window = Window::new(base, base + TimeDelta::minutes(WINDOW_MINUTES)).unwrap();
        let mut at = 0;
        let mut list = Vec::new();
        for &(gap, len) in pairs {
            let start = at + gap;
            let end = start + len;
            list.push(
                TimeInterval::new(base + TimeDelta::minutes(start), base + TimeDelta::minutes(end))
                    .unwrap(),
            );
            at = end;
        }
        (window, list)
    }

    fn minute_of(window: &Window, t: crate::Timestamp) -> i64 {
        (t - window.time_min()).num_minutes()
    }

    proptest! {
        #[test]
        fn slots_are_disjoint_inside_window_long_enough_and_maximal(
            pairs in busy_strategy(),
            min in 1i64..180,
        ) {
            let (window, list) = build(&pairs);
            let min_duration = TimeDelta::minutes(min);
            let slots = find_free_slots(&window, &list, min_duration);

            let mut covered = vec![0u8; WINDOW_MINUTES as usize];
            for b in &list {
                let s = minute_of(&window, b.start()).clamp(0, WINDOW_MINUTES);
                let e = minute_of(&window, b.end()).clamp(0, WINDOW_MINUTES);
                for m in s..e {
                    covered[m as usize] = 1;
                }
            }

            for (i, slot) in slots.iter().enumerate() {
                prop_assert!(window.as_interval().contains(slot));
                prop_assert!(slot.duration() >= min_duration);
                for other in &slots[i + 1..] {
                    prop_assert!(!slot.overlaps(other));
                }
                for m in minute_of(&window, slot.start())..minute_of(&window, slot.end()) {
                    prop_assert_eq!(covered[m as usize], 0, "slot overlaps busy time");
                    covered[m as usize] = 2;
                }
            }

            // Whatever is neither busy nor returned must be too short to matter.
            let mut run = 0;
            for &c in &covered {
                if c == 0 {
                    run += 1;
                    prop_assert!(run < min, "unreported free run of {} minutes", run);
                } else {
                    run = 0;
                }
            }
        }

        #[test]
        fn repeated_calls_are_identical(pairs in busy_strategy(), min in 1i64..180) {
            let (window, list) = build(&pairs);
            let first = find_free_slots(&window, &list, TimeDelta::minutes(min));
            let second = find_free_slots(&window, &list, TimeDelta::minutes(min));
            prop_assert_eq!(first, second);
        }
    }
}
