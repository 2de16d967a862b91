// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Lookup order: `./agenda.toml` > `~/.config/agenda/agenda.toml` >
//! `/etc/agenda/agenda.toml`, with `AGENDA_` environment overrides on top.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::AgendaConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/agenda/agenda.toml";

/// Config file in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "agenda.toml";

/// Path of the per-user config file, if a config dir exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("agenda").join("agenda.toml"))
}

/// Load configuration from the standard hierarchy.
///
/// Merge order (later overrides earlier): compiled defaults, system file,
/// user file, local file, `AGENDA_*` environment variables.
pub fn load_config() -> Result<AgendaConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from an inline TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<AgendaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AgendaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one explicit file, with env overrides.
pub fn load_config_from_path(path: &Path) -> Result<AgendaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AgendaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The Figment behind [`load_config`], before extraction.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new()
        .merge(Serialized::defaults(AgendaConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH));
    if let Some(user) = user_config_path() {
        figment = figment.merge(Toml::file(user));
    }
    figment
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Maps `AGENDA_SECTION_KEY` to `section.key`.
///
/// Only the first underscore after the section name becomes a dot, so
/// `AGENDA_CALENDAR_ACCESS_TOKEN` lands on `calendar.access_token`.
fn env_provider() -> Env {
    Env::prefixed("AGENDA_").map(|key| {
        let key = key.as_str().to_ascii_lowercase();
        let mapped = ["agent", "server", "bridge", "calendar", "providers"]
            .iter()
            .find_map(|section| {
                key.strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|rest| format!("{section}.{rest}"))
            })
            .unwrap_or(key);
        mapped.into()
    })
}
