// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Current time in the calendar's zone.

use agenda_core::AgendaError;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde_json::Value;

use crate::tool::{Tool, ToolOutput};

pub struct ClockTool {
    tz: Tz,
}

impl ClockTool {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }
}

pub fn describe<Z: TimeZone>(now: &DateTime<Z>, zone: &str) -> String
where
    Z::Offset: std::fmt::Display,
{
    format!(
        "Current time ({zone}): {}, {}",
        now.format("%Y-%m-%d %H:%M:%S"),
        now.format("%A")
    )
}

#[async_trait]
impl Tool for ClockTool {
    fn name(&self) -> &str {
        "get_time"
    }

    fn description(&self) -> &str {
        "Current date, time, and weekday. No parameters."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({ "type": "object", "properties": {} })
    }

    async fn invoke(&self, _input: Value) -> Result<ToolOutput, AgendaError> {
        let now = Utc::now().with_timezone(&self.tz);
        Ok(ToolOutput::success(describe(&now, self.tz.name())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_weekday() {
        let now = chrono_tz::Asia::Taipei
            .with_ymd_and_hms(2025, 7, 18, 9, 5, 0)
            .unwrap();
        assert_eq!(
            describe(&now, "Asia/Taipei"),
            "Current time (Asia/Taipei): 2025-07-18 09:05:00, Friday"
        );
    }

    #[tokio::test]
    async fn has_no_parameters() {
        let tool = ClockTool::new(chrono_tz::UTC);
        assert!(crate::tool::parameter_names(&tool.parameters_schema()).is_empty());
        let out = tool.invoke(Value::Null).await.unwrap();
        assert!(out.content.starts_with("Current time (UTC): "));
    }
}
