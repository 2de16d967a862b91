// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Currency conversion (ExchangeRate-API v6).

use agenda_config::model::ProvidersConfig;
use agenda_core::AgendaError;
use async_trait::async_trait;
use serde_json::Value;

use super::http::{ProviderClient, error_field};
use super::{api_key, number_arg, require, text_arg};
use crate::tool::{Tool, ToolOutput};

const NAME: &str = "convert_currency";

pub struct CurrencyTool {
    client: ProviderClient,
    api_key: Option<String>,
    base_url: String,
}

impl CurrencyTool {
    pub fn new(client: ProviderClient, providers: &ProvidersConfig) -> Self {
        Self {
            client,
            api_key: providers.exchange_rate_api_key.clone(),
            base_url: providers.exchange_rate_base_url.clone(),
        }
    }

    async fn convert(&self, input: &Value) -> Result<String, AgendaError> {
        let args = require(NAME, input, &["amount", "from_currency", "to_currency"])?;
        let amount = number_arg("amount", args[0])?;
        let from = text_arg("from_currency", args[1])?.to_uppercase();
        let to = text_arg("to_currency", args[2])?.to_uppercase();
        let key = api_key(&self.api_key, "exchange_rate_api_key")?;

        let url = format!("{}/{key}/latest/{from}", self.base_url.trim_end_matches('/'));
        let (status, body) = self.client.get_json("exchange_rate", &url, &[]).await?;

        if !status.is_success() || body["result"] != "success" {
            return Err(AgendaError::external(
                "exchange_rate",
                error_field(&body, "error-type"),
            ));
        }

        let rate = body["conversion_rates"][to.as_str()]
            .as_f64()
            .ok_or_else(|| AgendaError::external("exchange_rate", format!("no rate for {to}")))?;
        Ok(format!(
            "{amount} {from} = {:.2} {to} (rate: {rate})",
            amount * rate
        ))
    }
}

#[async_trait]
impl Tool for CurrencyTool {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Convert an amount between currencies, e.g. for travel budgets or foreign purchases. \
         Parameters: amount (float), from_currency (str, ISO code), to_currency (str, ISO code). \
         Example: convert_currency(100, 'USD', 'TWD')."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "amount": { "type": "number", "description": "Amount to convert" },
                "from_currency": { "type": "string", "description": "Source currency code" },
                "to_currency": { "type": "string", "description": "Target currency code" }
            },
            "required": ["amount", "from_currency", "to_currency"]
        })
    }

    async fn invoke(&self, input: Value) -> Result<ToolOutput, AgendaError> {
        Ok(match self.convert(&input).await {
            Ok(text) => ToolOutput::success(text),
            Err(err) => ToolOutput::failure(NAME, &err),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tool(base_url: &str) -> CurrencyTool {
        let providers = ProvidersConfig {
            exchange_rate_api_key: Some("k".into()),
            exchange_rate_base_url: base_url.to_string(),
            ..ProvidersConfig::default()
        };
        CurrencyTool::new(ProviderClient::new().unwrap(), &providers)
    }

    #[tokio::test]
    async fn converts_with_uppercased_codes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/k/latest/USD"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": "success",
                "conversion_rates": {"TWD": 32.5, "JPY": 150.0}
            })))
            .mount(&server)
            .await;

        let out = tool(&server.uri())
            .invoke(json!({"amount": 100, "from_currency": "usd", "to_currency": "twd"}))
            .await
            .unwrap();
        assert_eq!(out, ToolOutput::success("100 USD = 3250.00 TWD (rate: 32.5)"));
    }

    #[tokio::test]
    async fn unknown_target_currency() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": "success",
                "conversion_rates": {"TWD": 32.5}
            })))
            .mount(&server)
            .await;

        let out = tool(&server.uri())
            .invoke(json!({"amount": "5", "from_currency": "USD", "to_currency": "XYZ"}))
            .await
            .unwrap();
        assert!(out.is_error);
        assert_eq!(out.content, "convert_currency: exchange_rate error: no rate for XYZ");
    }

    #[tokio::test]
    async fn provider_error_type_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": "error",
                "error-type": "unsupported-code"
            })))
            .mount(&server)
            .await;

        let out = tool(&server.uri())
            .invoke(json!({"amount": 1, "from_currency": "ABC", "to_currency": "TWD"}))
            .await
            .unwrap();
        assert!(out.content.ends_with("unsupported-code"), "got: {}", out.content);
    }

    #[tokio::test]
    async fn all_missing_arguments_listed() {
        let out = tool("http://127.0.0.1:9").invoke(json!({})).await.unwrap();
        assert_eq!(
            out.content,
            "convert_currency: missing required parameters: amount, from_currency, to_currency"
        );
    }
}
