// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Activity suggestion from a free-text weather description.

use agenda_core::AgendaError;
use async_trait::async_trait;
use serde_json::Value;

use crate::tool::{Tool, ToolOutput};

const SUNNY: &[&str] = &["sunny", "clear", "晴"];
const RAINY: &[&str] = &["rain", "shower", "雨"];

pub struct SuggestActivityTool;

/// Sunny beats rainy when both appear.
pub fn suggest(context: &str) -> &'static str {
    let context = context.to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|w| context.contains(w));

    if mentions(SUNNY) {
        "Sunny weather: a walk or some outdoor exercise would suit the day."
    } else if mentions(RAINY) {
        "Rainy weather: stay in with a book or a film."
    } else {
        "No clear weather signal: pick whatever fits the schedule."
    }
}

#[async_trait]
impl Tool for SuggestActivityTool {
    fn name(&self) -> &str {
        "suggest_activity"
    }

    fn description(&self) -> &str {
        "Suggest an activity that suits the weather. Parameters: context (str, weather description)."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "context": { "type": "string", "description": "Weather or situation description" }
            },
            "required": ["context"]
        })
    }

    async fn invoke(&self, input: Value) -> Result<ToolOutput, AgendaError> {
        let context = input["context"].as_str().unwrap_or_default();
        Ok(ToolOutput::success(suggest(context)))
    }
}
