// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client of the tool server.
//!
//! `GET /v1/tools` lists descriptors and `POST /v1/tools/call` invokes one
//! tool. Deadlines are the bridge's business, so only connection setup is
//! bounded here.

use std::time::Duration;

use agenda_config::model::BridgeConfig;
use agenda_core::{AgendaError, ToolArguments, ToolCall, ToolDescriptor, ToolResponse, ToolTransport};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

/// Body of `GET /v1/tools`.
#[derive(Debug, Deserialize)]
struct ToolList {
    tools: Vec<ToolDescriptor>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// [`ToolTransport`] over the tool server's REST API.
#[derive(Debug, Clone)]
pub struct HttpToolTransport {
    client: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpToolTransport {
    pub fn new(base_url: impl Into<String>, bearer_token: Option<String>) -> Result<Self, AgendaError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AgendaError::Transport {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token,
        })
    }

    pub fn from_config(config: &BridgeConfig) -> Result<Self, AgendaError> {
        Self::new(config.server_url.clone(), config.bearer_token.clone())
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, AgendaError> {
        self.authorize(request)
            .send()
            .await
            .map_err(|e| AgendaError::Transport {
                message: format!("tool server unreachable: {e}"),
                source: Some(Box::new(e)),
            })
    }
}

async fn failure(response: reqwest::Response) -> AgendaError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.error)
        .unwrap_or(body);
    AgendaError::transport(format!("tool server returned {status}: {detail}"))
}

fn unreadable(e: reqwest::Error) -> AgendaError {
    AgendaError::Transport {
        message: format!("unreadable tool server response: {e}"),
        source: Some(Box::new(e)),
    }
}

#[async_trait]
impl ToolTransport for HttpToolTransport {
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, AgendaError> {
        let response = self
            .send(self.client.get(format!("{}/v1/tools", self.base_url)))
            .await?;
        if !response.status().is_success() {
            return Err(failure(response).await);
        }
        let list: ToolList = response.json().await.map_err(unreadable)?;
        debug!(count = list.tools.len(), "tool list received");
        Ok(list.tools)
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: ToolArguments,
    ) -> Result<ToolResponse, AgendaError> {
        let body = ToolCall {
            name: name.to_string(),
            arguments,
        };
        let response = self
            .send(
                self.client
                    .post(format!("{}/v1/tools/call", self.base_url))
                    .json(&body),
            )
            .await?;

        match response.status() {
            status if status.is_success() => response.json().await.map_err(unreadable),
            StatusCode::NOT_FOUND => Err(AgendaError::UnknownTool(name.to_string())),
            _ => Err(failure(response).await),
        }
    }
}
