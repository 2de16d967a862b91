// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared HTTP client for the information providers.
//!
//! One GET, one JSON body, no retries. Provider error bodies are still JSON,
//! so the status is returned alongside the parsed body for the caller to
//! interpret.

use std::time::Duration;

use agenda_core::AgendaError;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ProviderClient {
    client: reqwest::Client,
}

impl ProviderClient {
    pub fn new() -> Result<Self, AgendaError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| AgendaError::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// GETs `url` with `query` and parses the body as JSON.
    pub async fn get_json(
        &self,
        service: &str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<(StatusCode, Value), AgendaError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| AgendaError::ExternalService {
                service: service.into(),
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(service, status = %status, "provider response received");

        let body = response.json::<Value>().await.map_err(|e| AgendaError::ExternalService {
            service: service.into(),
            message: format!("{status} with unreadable body: {e}"),
            source: Some(Box::new(e)),
        })?;
        Ok((status, body))
    }
}

/// `body[field]` as text, for provider error messages.
pub(crate) fn error_field(body: &Value, field: &str) -> String {
    match body.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn returns_status_and_body_for_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lookup"))
            .and(query_param("q", "x"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})))
            .mount(&server)
            .await;

        let client = ProviderClient::new().unwrap();
        let (status, body) = client
            .get_json("demo", &format!("{}/lookup", server.uri()), &[("q", "x".into())])
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error_field(&body, "message"), "not found");
    }

    #[tokio::test]
    async fn non_json_body_is_an_external_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let client = ProviderClient::new().unwrap();
        let err = client.get_json("demo", &server.uri(), &[]).await.unwrap_err();
        assert!(err.to_string().starts_with("demo error: 502"), "got: {err}");
    }
}
