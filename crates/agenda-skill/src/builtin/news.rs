// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Top headlines for a country (NewsAPI).

use agenda_config::model::ProvidersConfig;
use agenda_core::AgendaError;
use async_trait::async_trait;
use serde_json::Value;

use super::http::{ProviderClient, error_field};
use super::{api_key, require, text_arg};
use crate::tool::{Tool, ToolOutput};

const NAME: &str = "get_news_headlines";
const HEADLINES: usize = 3;

pub struct NewsTool {
    client: ProviderClient,
    api_key: Option<String>,
    base_url: String,
    language: String,
}

impl NewsTool {
    pub fn new(client: ProviderClient, providers: &ProvidersConfig) -> Self {
        Self {
            client,
            api_key: providers.news_api_key.clone(),
            base_url: providers.news_base_url.clone(),
            language: providers.news_language.clone(),
        }
    }

    async fn headlines(&self, input: &Value) -> Result<String, AgendaError> {
        let args = require(NAME, input, &["country"])?;
        let country = text_arg("country", args[0])?;
        let key = api_key(&self.api_key, "news_api_key")?;

        let (status, body) = self
            .client
            .get_json(
                "news",
                &format!("{}/top-headlines", self.base_url.trim_end_matches('/')),
                &[
                    ("country", country.to_lowercase()),
                    ("pageSize", HEADLINES.to_string()),
                    ("apiKey", key.to_string()),
                    ("language", self.language.clone()),
                ],
            )
            .await?;

        if !status.is_success() || body["status"] != "ok" {
            return Err(AgendaError::external("news", error_field(&body, "message")));
        }

        let titles: Vec<String> = body["articles"]
            .as_array()
            .map(|articles| {
                articles
                    .iter()
                    .take(HEADLINES)
                    .enumerate()
                    .map(|(i, a)| format!("{}. {}", i + 1, a["title"].as_str().unwrap_or("(untitled)")))
                    .collect()
            })
            .unwrap_or_default();

        if titles.is_empty() {
            return Ok(format!("No news found for {country}."));
        }
        Ok(titles.join("\n"))
    }
}

#[async_trait]
impl Tool for NewsTool {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Top 3 news headlines for a country. Parameters: country (str, two-letter code)."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "country": { "type": "string", "description": "Two-letter country code, e.g. tw" }
            },
            "required": ["country"]
        })
    }

    async fn invoke(&self, input: Value) -> Result<ToolOutput, AgendaError> {
        Ok(match self.headlines(&input).await {
            Ok(text) => ToolOutput::success(text),
            Err(err) => ToolOutput::failure(NAME, &err),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tool(base_url: &str) -> NewsTool {
        let providers = ProvidersConfig {
            news_api_key: Some("k".into()),
            news_base_url: base_url.to_string(),
            ..ProvidersConfig::default()
        };
        NewsTool::new(ProviderClient::new().unwrap(), &providers)
    }

    #[tokio::test]
    async fn numbers_at_most_three_headlines() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/top-headlines"))
            .and(query_param("country", "tw"))
            .and(query_param("pageSize", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "articles": [
                    {"title": "One"}, {"title": "Two"}, {"title": "Three"}, {"title": "Four"}
                ]
            })))
            .mount(&server)
            .await;

        let out = tool(&server.uri()).invoke(json!({"country": "TW"})).await.unwrap();
        assert_eq!(out.content, "1. One\n2. Two\n3. Three");
    }

    #[tokio::test]
    async fn empty_article_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok", "articles": []})))
            .mount(&server)
            .await;

        let out = tool(&server.uri()).invoke(json!({"country": "aq"})).await.unwrap();
        assert_eq!(out, ToolOutput::success("No news found for aq."));
    }

    #[tokio::test]
    async fn api_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "status": "error",
                "message": "Your API key is invalid"
            })))
            .mount(&server)
            .await;

        let out = tool(&server.uri()).invoke(json!({"country": "us"})).await.unwrap();
        assert_eq!(out.content, "get_news_headlines: news error: Your API key is invalid");
    }
}
