// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Calendar v3 REST backend.
//!
//! Authenticates with a bearer access token taken from configuration.
//! Obtaining and refreshing that token is left to the operator.

use std::collections::HashMap;
use std::time::Duration;

use agenda_config::model::CalendarConfig;
use agenda_core::AgendaError;
use agenda_schedule::{TimeInterval, Window, format_timestamp, parse_timestamp};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backend::{CalendarBackend, CalendarEvent, CreatedEvent, NewEvent};

const SERVICE: &str = "google_calendar";

/// Calendar collaborator backed by the Google Calendar REST API.
#[derive(Debug, Clone)]
pub struct GoogleCalendar {
    client: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

impl GoogleCalendar {
    /// Creates a backend against `base_url` (normally
    /// `https://www.googleapis.com/calendar/v3`).
    ///
    /// Without a token the backend still constructs, and every call fails
    /// with an [`AgendaError::ExternalService`] explaining what to set.
    pub fn new(base_url: impl Into<String>, access_token: Option<String>) -> Result<Self, AgendaError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AgendaError::ExternalService {
                service: SERVICE.into(),
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            access_token: access_token.filter(|t| !t.is_empty()),
        })
    }

    pub fn from_config(config: &CalendarConfig) -> Result<Self, AgendaError> {
        Self::new(config.api_base_url.clone(), config.access_token.clone())
    }

    fn token(&self) -> Result<&str, AgendaError> {
        self.access_token.as_deref().ok_or_else(|| {
            AgendaError::external(
                SERVICE,
                "no access token configured (set calendar.access_token or AGENDA_CALENDAR_ACCESS_TOKEN)",
            )
        })
    }

    fn url(&self, segments: &[&str]) -> Result<Url, AgendaError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            AgendaError::Config(format!("invalid calendar.api_base_url `{}`: {e}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|()| AgendaError::Config(format!("calendar.api_base_url `{}` cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: for<'de> Deserialize<'de>>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, AgendaError> {
        let response = request
            .bearer_auth(self.token()?)
            .send()
            .await
            .map_err(|e| AgendaError::ExternalService {
                service: SERVICE.into(),
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "calendar response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgendaError::external(SERVICE, describe_failure(status, &body)));
        }

        response.json::<T>().await.map_err(|e| AgendaError::ExternalService {
            service: SERVICE.into(),
            message: format!("failed to parse calendar response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[async_trait]
impl CalendarBackend for GoogleCalendar {
    async fn list_events(
        &self,
        calendar_id: &str,
        window: &Window,
    ) -> Result<Vec<CalendarEvent>, AgendaError> {
        let url = self.url(&["calendars", calendar_id, "events"])?;
        let time_min = format_timestamp(&window.time_min());
        let time_max = format_timestamp(&window.time_max());

        let mut events = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut query = vec![
                ("timeMin", time_min.as_str()),
                ("timeMax", time_max.as_str()),
                ("singleEvents", "true"),
                ("orderBy", "startTime"),
            ];
            if let Some(token) = page_token.as_deref() {
                query.push(("pageToken", token));
            }

            let page: EventsPage = self.send(self.client.get(url.clone()).query(&query)).await?;
            events.extend(page.items.into_iter().filter_map(EventItem::into_event));

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!(calendar_id, count = events.len(), "listed calendar events");
        Ok(events)
    }

    async fn free_busy(
        &self,
        calendar_id: &str,
        window: &Window,
        timezone: &str,
    ) -> Result<Vec<TimeInterval>, AgendaError> {
        let url = self.url(&["freeBusy"])?;
        let body = FreeBusyQuery {
            time_min: format_timestamp(&window.time_min()),
            time_max: format_timestamp(&window.time_max()),
            time_zone: timezone,
            items: vec![CalendarRef { id: calendar_id }],
        };

        let mut response: FreeBusyResponse = self.send(self.client.post(url).json(&body)).await?;
        let calendar = response.calendars.remove(calendar_id).ok_or_else(|| {
            AgendaError::external(SERVICE, format!("free/busy response has no entry for `{calendar_id}`"))
        })?;

        if let Some(error) = calendar.errors.first() {
            return Err(AgendaError::external(
                SERVICE,
                format!("free/busy query failed for `{calendar_id}`: {}", error.reason),
            ));
        }

        let mut busy = Vec::with_capacity(calendar.busy.len());
        for entry in &calendar.busy {
            let start = parse_timestamp(&entry.start)?;
            let end = parse_timestamp(&entry.end)?;
            if start >= end {
                debug!(start = entry.start.as_str(), end = entry.end.as_str(), "skipping empty busy entry");
                continue;
            }
            busy.push(TimeInterval::new(start, end)?);
        }
        Ok(busy)
    }

    async fn insert_event(
        &self,
        calendar_id: &str,
        event: &NewEvent,
    ) -> Result<CreatedEvent, AgendaError> {
        let url = self.url(&["calendars", calendar_id, "events"])?;
        let body = EventInsert {
            summary: &event.summary,
            description: &event.description,
            start: EventDateTime {
                date_time: format_timestamp(&event.start),
                time_zone: &event.timezone,
            },
            end: EventDateTime {
                date_time: format_timestamp(&event.end),
                time_zone: &event.timezone,
            },
        };

        let created: InsertedEvent = self.send(self.client.post(url).json(&body)).await?;
        debug!(calendar_id, summary = event.summary.as_str(), "calendar event created");
        Ok(CreatedEvent {
            link: created.html_link.unwrap_or_default(),
        })
    }
}

/// Builds a readable message from a non-success status and its body.
fn describe_failure(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(api) => format!("API returned {status}: {}", api.error.message),
        Err(_) if body.is_empty() => format!("API returned {status}"),
        Err(_) => format!("API returned {status}: {body}"),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventsPage {
    #[serde(default)]
    items: Vec<EventItem>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventItem {
    #[serde(default)]
    summary: String,
    start: Option<EventStart>,
}

impl EventItem {
    fn into_event(self) -> Option<CalendarEvent> {
        let start = self.start?;
        Some(CalendarEvent {
            start: start.date_time.or(start.date)?,
            summary: self.summary,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventStart {
    date_time: Option<String>,
    date: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FreeBusyQuery<'a> {
    time_min: String,
    time_max: String,
    time_zone: &'a str,
    items: Vec<CalendarRef<'a>>,
}

#[derive(Debug, Serialize)]
struct CalendarRef<'a> {
    id: &'a str,
}

#[derive(Debug, Deserialize)]
struct FreeBusyResponse {
    #[serde(default)]
    calendars: HashMap<String, FreeBusyCalendar>,
}

#[derive(Debug, Deserialize)]
struct FreeBusyCalendar {
    #[serde(default)]
    busy: Vec<BusyPeriod>,
    #[serde(default)]
    errors: Vec<FreeBusyError>,
}

#[derive(Debug, Deserialize)]
struct BusyPeriod {
    start: String,
    end: String,
}

#[derive(Debug, Deserialize)]
struct FreeBusyError {
    #[serde(default)]
    reason: String,
}

#[derive(Debug, Serialize)]
struct EventInsert<'a> {
    summary: &'a str,
    description: &'a str,
    start: EventDateTime<'a>,
    end: EventDateTime<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventDateTime<'a> {
    date_time: String,
    time_zone: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsertedEvent {
    html_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn window() -> Window {
        Window::new(
            parse_timestamp("2025-07-18T00:00:00+08:00").unwrap(),
            parse_timestamp("2025-07-19T00:00:00+08:00").unwrap(),
        )
        .unwrap()
    }

    fn backend(server: &MockServer) -> GoogleCalendar {
        GoogleCalendar::new(server.uri(), Some("test-token".into())).unwrap()
    }

    #[tokio::test]
    async fn list_events_sends_ordered_single_event_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/calendars/primary/events"))
            .and(header("authorization", "Bearer test-token"))
            .and(query_param("singleEvents", "true"))
            .and(query_param("orderBy", "startTime"))
            .and(query_param("timeMin", "2025-07-18T00:00:00+08:00"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    {"summary": "Standup", "start": {"dateTime": "2025-07-18T09:00:00+08:00"}},
                    {"summary": "Holiday", "start": {"date": "2025-07-18"}},
                    {"start": {"dateTime": "2025-07-18T15:00:00+08:00"}}
                ]
            })))
            .mount(&server)
            .await;

        let events = backend(&server).list_events("primary", &window()).await.unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].start, "2025-07-18T09:00:00+08:00");
        assert_eq!(events[0].summary, "Standup");
        assert_eq!(events[1].start, "2025-07-18");
        assert_eq!(events[2].summary, "");
    }

    #[tokio::test]
    async fn list_events_follows_page_tokens() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/calendars/primary/events"))
            .and(query_param("pageToken", "p2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{"summary": "Second", "start": {"dateTime": "2025-07-18T11:00:00+08:00"}}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/calendars/primary/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{"summary": "First", "start": {"dateTime": "2025-07-18T10:00:00+08:00"}}],
                "nextPageToken": "p2"
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        let events = backend(&server).list_events("primary", &window()).await.unwrap();
        let titles: Vec<_> = events.iter().map(|e| e.summary.as_str()).collect();
        assert_eq!(titles, ["First", "Second"]);
    }

    #[tokio::test]
    async fn free_busy_parses_busy_intervals() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/freeBusy"))
            .and(body_partial_json(json!({
                "timeZone": "Asia/Taipei",
                "items": [{"id": "primary"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "calendars": {"primary": {"busy": [
                    {"start": "2025-07-18T02:00:00Z", "end": "2025-07-18T03:00:00Z"}
                ]}}
            })))
            .mount(&server)
            .await;

        let busy = backend(&server)
            .free_busy("primary", &window(), "Asia/Taipei")
            .await
            .unwrap();
        assert_eq!(busy.len(), 1);
        assert_eq!(busy[0].duration(), chrono::TimeDelta::hours(1));
    }

    #[tokio::test]
    async fn free_busy_skips_empty_and_inverted_entries() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/freeBusy"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "calendars": {"primary": {"busy": [
                    {"start": "2025-07-18T02:00:00Z", "end": "2025-07-18T02:00:00Z"},
                    {"start": "2025-07-18T05:00:00Z", "end": "2025-07-18T04:00:00Z"},
                    {"start": "2025-07-18T06:00:00Z", "end": "2025-07-18T06:30:00Z"}
                ]}}
            })))
            .mount(&server)
            .await;

        let busy = backend(&server)
            .free_busy("primary", &window(), "Asia/Taipei")
            .await
            .unwrap();
        assert_eq!(busy.len(), 1);
        assert_eq!(busy[0].duration(), chrono::TimeDelta::minutes(30));
    }

    #[tokio::test]
    async fn free_busy_surfaces_calendar_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/freeBusy"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "calendars": {"primary": {"errors": [{"domain": "global", "reason": "notFound"}]}}
            })))
            .mount(&server)
            .await;

        let err = backend(&server)
            .free_busy("primary", &window(), "Asia/Taipei")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("notFound"), "got: {err}");
    }

    #[tokio::test]
    async fn insert_event_returns_html_link() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/calendars/primary/events"))
            .and(body_partial_json(json!({
                "summary": "Review",
                "start": {"dateTime": "2025-07-18T10:00:00+08:00", "timeZone": "Asia/Taipei"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "htmlLink": "https://calendar.google.com/event?eid=abc"
            })))
            .mount(&server)
            .await;

        let event = NewEvent {
            summary: "Review".into(),
            description: String::new(),
            start: parse_timestamp("2025-07-18T10:00:00+08:00").unwrap(),
            end: parse_timestamp("2025-07-18T11:00:00+08:00").unwrap(),
            timezone: "Asia/Taipei".into(),
        };
        let created = backend(&server).insert_event("primary", &event).await.unwrap();
        assert_eq!(created.link, "https://calendar.google.com/event?eid=abc");
    }

    #[tokio::test]
    async fn api_error_message_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": {"code": 403, "message": "Insufficient Permission"}
            })))
            .mount(&server)
            .await;

        let err = backend(&server).list_events("primary", &window()).await.unwrap_err();
        let text = err.to_string();
        assert!(text.starts_with("google_calendar error:"), "got: {text}");
        assert!(text.contains("Insufficient Permission"), "got: {text}");
    }

    #[tokio::test]
    async fn missing_token_fails_without_a_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let backend = GoogleCalendar::new(server.uri(), None).unwrap();
        let err = backend.list_events("primary", &window()).await.unwrap_err();
        assert!(err.to_string().contains("access_token"), "got: {err}");
    }

    #[test]
    fn calendar_id_is_path_encoded() {
        let backend = GoogleCalendar::new("https://example.test/calendar/v3", None).unwrap();
        let url = backend.url(&["calendars", "team#ops@group", "events"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.test/calendar/v3/calendars/team%23ops@group/events"
        );
    }
}
