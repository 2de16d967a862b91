// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Current weather for a city (OpenWeatherMap).

use agenda_config::model::ProvidersConfig;
use agenda_core::AgendaError;
use async_trait::async_trait;
use serde_json::Value;

use super::http::{ProviderClient, error_field};
use super::{api_key, require, text_arg};
use crate::tool::{Tool, ToolOutput};

const NAME: &str = "get_weather";

pub struct WeatherTool {
    client: ProviderClient,
    api_key: Option<String>,
    base_url: String,
    language: String,
}

impl WeatherTool {
    pub fn new(client: ProviderClient, providers: &ProvidersConfig) -> Self {
        Self {
            client,
            api_key: providers.weather_api_key.clone(),
            base_url: providers.weather_base_url.clone(),
            language: providers.weather_language.clone(),
        }
    }

    async fn lookup(&self, input: &Value) -> Result<String, AgendaError> {
        let args = require(NAME, input, &["city"])?;
        let city = text_arg("city", args[0])?;
        let key = api_key(&self.api_key, "weather_api_key")?;

        let (status, body) = self
            .client
            .get_json(
                "weather",
                &format!("{}/weather", self.base_url.trim_end_matches('/')),
                &[
                    ("q", city.clone()),
                    ("appid", key.to_string()),
                    ("units", "metric".into()),
                    ("lang", self.language.clone()),
                ],
            )
            .await?;

        if !status.is_success() {
            return Err(AgendaError::external("weather", error_field(&body, "message")));
        }

        let description = body["weather"][0]["description"].as_str().unwrap_or("unknown");
        let temperature = &body["main"]["temp"];
        Ok(format!("{city} weather: {description}, temperature: {temperature}°C"))
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Current weather for a city. Parameters: city (str)."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "city": { "type": "string", "description": "City name, e.g. Taipei" }
            },
            "required": ["city"]
        })
    }

    async fn invoke(&self, input: Value) -> Result<ToolOutput, AgendaError> {
        Ok(match self.lookup(&input).await {
            Ok(text) => ToolOutput::success(text),
            Err(err) => ToolOutput::failure(NAME, &err),
        })
    }
}
