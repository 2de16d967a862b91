// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks serde attributes cannot express.

use crate::diagnostic::ConfigError;
use crate::model::AgendaConfig;

/// Validate a deserialized configuration.
///
/// Collects every violation instead of stopping at the first one.
pub fn validate_config(config: &AgendaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    if config.server.host.trim().is_empty() {
        fail("server.host must not be empty".to_string());
    }

    if config.server.port == 0 {
        fail("server.port must not be 0".to_string());
    }

    let url = config.bridge.server_url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        fail(format!(
            "bridge.server_url `{url}` must start with http:// or https://"
        ));
    }

    if config.bridge.timeout_secs == 0 {
        fail("bridge.timeout_secs must be at least 1".to_string());
    }

    if config.calendar.calendar_id.trim().is_empty() {
        fail("calendar.calendar_id must not be empty".to_string());
    }

    if config.calendar.tz().is_err() {
        fail(format!(
            "calendar.timezone `{}` is not an IANA time zone name",
            config.calendar.timezone
        ));
    }

    if config.calendar.default_event_minutes < 1 {
        fail(format!(
            "calendar.default_event_minutes must be at least 1, got {}",
            config.calendar.default_event_minutes
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
