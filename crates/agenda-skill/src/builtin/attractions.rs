// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Attraction itinerary for a country (Google Places text search).

use agenda_config::model::ProvidersConfig;
use agenda_core::AgendaError;
use async_trait::async_trait;
use serde_json::Value;

use super::http::ProviderClient;
use super::{api_key, number_arg, require, text_arg};
use crate::tool::{Tool, ToolOutput};

const NAME: &str = "get_global_attractions";

/// Longest itinerary the tool will lay out.
const MAX_DAYS: f64 = 365.0;

pub struct AttractionsTool {
    client: ProviderClient,
    api_key: Option<String>,
    base_url: String,
}

impl AttractionsTool {
    pub fn new(client: ProviderClient, providers: &ProvidersConfig) -> Self {
        Self {
            client,
            api_key: providers.places_api_key.clone(),
            base_url: providers.places_base_url.clone(),
        }
    }

    async fn itinerary(&self, input: &Value) -> Result<String, AgendaError> {
        let args = require(NAME, input, &["country", "budget", "days"])?;
        let country = text_arg("country", args[0])?;
        let budget = number_arg("budget", args[1])?;
        let days = number_arg("days", args[2])?;
        if !(1.0..=MAX_DAYS).contains(&days) || days.fract() != 0.0 {
            return Err(AgendaError::InvalidArgument {
                name: "days".into(),
                reason: format!("expected a whole number of days from 1 to {MAX_DAYS}, got {days}"),
            });
        }
        let days = days as usize;
        let key = api_key(&self.api_key, "places_api_key")?;

        let (_, body) = self
            .client
            .get_json(
                "places",
                &format!("{}/textsearch/json", self.base_url.trim_end_matches('/')),
                &[
                    ("query", format!("tourist attractions in {country}")),
                    ("key", key.to_string()),
                ],
            )
            .await?;

        let status = body["status"].as_str().unwrap_or("UNKNOWN");
        if status != "OK" {
            return Err(AgendaError::external("places", status));
        }

        let names: Vec<&str> = body["results"]
            .as_array()
            .map(|results| results.iter().filter_map(|r| r["name"].as_str()).collect())
            .unwrap_or_default();
        Ok(plan_days(&names, budget, days))
    }
}

/// Splits `names` into `days` consecutive groups of equal size (at least
/// one each) with an even share of the budget. Trailing names that do not
/// fill a group are dropped; days past the end of the list stay empty.
pub fn plan_days(names: &[&str], budget: f64, days: usize) -> String {
    let per_day = (names.len() / days).max(1);
    let daily_budget = budget / days as f64;

    (0..days)
        .map(|day| {
            let from = (day * per_day).min(names.len());
            let to = ((day + 1) * per_day).min(names.len());
            format!(
                "Day {} (budget {daily_budget:.2} USD): {}",
                day + 1,
                names[from..to].join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl Tool for AttractionsTool {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Find tourist attractions in a country and split them into a day-by-day plan. \
         Parameters: country (str), budget (float, USD), days (int)."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "country": { "type": "string" },
                "budget": { "type": "number", "description": "Total budget in USD" },
                "days": { "type": "integer", "minimum": 1, "maximum": 365 }
            },
            "required": ["country", "budget", "days"]
        })
    }

    async fn invoke(&self, input: Value) -> Result<ToolOutput, AgendaError> {
        Ok(match self.itinerary(&input).await {
            Ok(text) => ToolOutput::success(text),
            Err(err) => ToolOutput::failure(NAME, &err),
        })
    }
}
