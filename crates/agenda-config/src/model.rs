// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is
//! reported at startup instead of being silently ignored.

use std::time::Duration;

use agenda_core::AgendaError;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Top-level configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgendaConfig {
    /// Process-wide settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Tool server (the side that owns the tool implementations).
    #[serde(default)]
    pub server: ServerConfig,

    /// Invocation bridge (the side the agent calls from).
    #[serde(default)]
    pub bridge: BridgeConfig,

    /// Calendar collaborator settings.
    #[serde(default)]
    pub calendar: CalendarConfig,

    /// API keys and endpoints of the auxiliary information providers.
    #[serde(default)]
    pub providers: ProvidersConfig,
}

/// Process-wide settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// HTTP tool server settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,

    #[serde(default = "default_server_port")]
    pub port: u16,

    /// Bearer token required from callers. Without one, only a loopback
    /// server accepts requests.
    #[serde(default)]
    pub bearer_token: Option<String>,
}

impl ServerConfig {
    /// Whether `host` only accepts connections from this machine.
    pub fn is_loopback(&self) -> bool {
        match self.host.parse::<std::net::IpAddr>() {
            Ok(ip) => ip.is_loopback(),
            Err(_) => self.host.eq_ignore_ascii_case("localhost"),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            bearer_token: None,
        }
    }
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    1234
}

/// Invocation bridge settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    /// Base URL of the tool server.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Deadline for a single bridged tool call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Bearer token sent to the tool server.
    #[serde(default)]
    pub bearer_token: Option<String>,
}

impl BridgeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            timeout_secs: default_timeout_secs(),
            bearer_token: None,
        }
    }
}

fn default_server_url() -> String {
    "http://127.0.0.1:1234".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Calendar collaborator settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarConfig {
    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,

    /// IANA zone used when a tool call does not name one.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default = "default_calendar_base_url")]
    pub api_base_url: String,

    /// OAuth access token for the calendar API.
    #[serde(default)]
    pub access_token: Option<String>,

    /// Duration used for auto-scheduled items that omit `duration_min`.
    #[serde(default = "default_event_minutes")]
    pub default_event_minutes: i64,
}

impl CalendarConfig {
    /// Parses [`Self::timezone`] as an IANA zone.
    pub fn tz(&self) -> Result<Tz, AgendaError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| AgendaError::Config(format!("calendar.timezone: {e}")))
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            calendar_id: default_calendar_id(),
            timezone: default_timezone(),
            api_base_url: default_calendar_base_url(),
            access_token: None,
            default_event_minutes: default_event_minutes(),
        }
    }
}

fn default_calendar_id() -> String {
    "primary".to_string()
}

fn default_timezone() -> String {
    "Asia/Taipei".to_string()
}

fn default_calendar_base_url() -> String {
    "https://www.googleapis.com/calendar/v3".to_string()
}

fn default_event_minutes() -> i64 {
    60
}

/// Auxiliary information providers. A missing key disables that tool's
/// lookups; the tool then answers with a configuration hint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub weather_api_key: Option<String>,

    #[serde(default = "default_weather_base_url")]
    pub weather_base_url: String,

    #[serde(default = "default_weather_language")]
    pub weather_language: String,

    #[serde(default)]
    pub exchange_rate_api_key: Option<String>,

    #[serde(default = "default_exchange_rate_base_url")]
    pub exchange_rate_base_url: String,

    #[serde(default)]
    pub news_api_key: Option<String>,

    #[serde(default = "default_news_base_url")]
    pub news_base_url: String,

    #[serde(default = "default_news_language")]
    pub news_language: String,

    #[serde(default)]
    pub places_api_key: Option<String>,

    #[serde(default = "default_places_base_url")]
    pub places_base_url: String,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            weather_api_key: None,
            weather_base_url: default_weather_base_url(),
            weather_language: default_weather_language(),
            exchange_rate_api_key: None,
            exchange_rate_base_url: default_exchange_rate_base_url(),
            news_api_key: None,
            news_base_url: default_news_base_url(),
            news_language: default_news_language(),
            places_api_key: None,
            places_base_url: default_places_base_url(),
        }
    }
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_weather_language() -> String {
    "zh_tw".to_string()
}

fn default_exchange_rate_base_url() -> String {
    "https://v6.exchangerate-api.com/v6".to_string()
}

fn default_news_base_url() -> String {
    "https://newsapi.org/v2".to_string()
}

fn default_news_language() -> String {
    "zh".to_string()
}

fn default_places_base_url() -> String {
    "https://maps.googleapis.com/maps/api/place".to_string()
}
