// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `google_calendar` tool through the in-process transport.

use agenda_core::ToolTransport;
use agenda_test_utils::{MockCalendar, TestHarness};
use serde_json::json;

#[tokio::test]
async fn auto_schedule_places_around_busy_time_and_commits() {
    let harness = TestHarness::new(
        MockCalendar::new().with_busy(&[("2025-07-18T10:00:00+08:00", "2025-07-18T11:00:00+08:00")]),
    )
    .unwrap();

    let response = harness
        .call(
            "google_calendar",
            json!({
                "operation": "auto_schedule",
                "time_min": "2025-07-18T09:00:00+08:00",
                "time_max": "2025-07-18T17:00:00+08:00",
                "events": [{"title": "Deep work", "duration_min": 90}]
            }),
        )
        .await
        .unwrap();

    assert!(!response.is_error);
    assert_eq!(
        response.first_text(),
        Some("Auto-scheduled:\nDeep work: 2025-07-18T11:00:00+08:00 - 2025-07-18T12:30:00+08:00")
    );
    let inserted = harness.calendar.inserted().await;
    assert_eq!(inserted.len(), 1);
    assert_eq!(inserted[0].timezone, "Asia/Taipei");
}

#[tokio::test]
async fn date_expands_in_configured_zone() {
    let harness = TestHarness::new(MockCalendar::new()).unwrap();

    let response = harness
        .call(
            "google_calendar",
            json!({"operation": "find_free_slots", "date": "2025-07-18", "duration": 60}),
        )
        .await
        .unwrap();

    assert_eq!(
        response.first_text(),
        Some("Free: 2025-07-18T00:00:00+08:00 to 2025-07-19T00:00:00+08:00")
    );
    let windows = harness.calendar.queried_windows().await;
    assert_eq!(windows[0].time_max() - windows[0].time_min(), chrono::TimeDelta::hours(24));
}

#[tokio::test]
async fn missing_parameters_come_back_as_error_text() {
    let harness = TestHarness::new(MockCalendar::new()).unwrap();

    let response = harness
        .call("google_calendar", json!({"operation": "add_event"}))
        .await
        .unwrap();

    assert!(response.is_error);
    assert_eq!(
        response.first_text(),
        Some("google_calendar add_event: missing required parameters: title, start, end")
    );
    assert!(harness.calendar.inserted().await.is_empty());
}

#[tokio::test]
async fn partial_auto_schedule_failure_reports_created_count() {
    let harness = TestHarness::new(MockCalendar::new().failing_inserts_after(2)).unwrap();

    let response = harness
        .call(
            "google_calendar",
            json!({
                "operation": "auto_schedule",
                "date": "2025-07-18",
                "events": [{"title": "A"}, {"title": "B"}, {"title": "C"}]
            }),
        )
        .await
        .unwrap();

    assert!(response.is_error);
    let text = response.first_text().unwrap();
    assert!(text.contains("after 2 of 3 events were already created"), "got: {text}");
}

#[tokio::test]
async fn listing_exposes_calendar_parameters_in_order() {
    let harness = TestHarness::new(MockCalendar::new()).unwrap();
    let tools = harness.transport.list_tools().await.unwrap();

    let calendar = tools.iter().find(|t| t.name == "google_calendar").unwrap();
    assert_eq!(
        calendar.parameter_names,
        [
            "operation", "time_min", "time_max", "duration", "title", "start", "end",
            "description", "timezone", "events", "date"
        ]
    );
}
