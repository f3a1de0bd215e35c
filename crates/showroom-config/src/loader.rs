// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./showroom.toml` > `~/.config/showroom/showroom.toml` >
//! `/etc/showroom/showroom.toml` with environment variable overrides via `SHOWROOM_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::ShowroomConfig;

/// System-wide config file location.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/showroom/showroom.toml";

/// Local config file, relative to the working directory.
pub const LOCAL_CONFIG_FILE: &str = "showroom.toml";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/showroom/showroom.toml`
/// 3. `~/.config/showroom/showroom.toml`
/// 4. `./showroom.toml`
/// 5. `SHOWROOM_*` environment variables
pub fn load_config() -> Result<ShowroomConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<ShowroomConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ShowroomConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ShowroomConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ShowroomConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment for the XDG hierarchy before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ShowroomConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// `~/.config/showroom/showroom.toml`, when the platform has a config dir.
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("showroom").join("showroom.toml"))
}

/// Environment provider mapping `SHOWROOM_<SECTION>_<KEY>` to `section.key`.
///
/// Uses `Env::map()` rather than `Env::split("_")` because keys themselves
/// contain underscores: `SHOWROOM_OPENAI_API_KEY` must become `openai.api_key`.
fn env_provider() -> Env {
    Env::prefixed("SHOWROOM_").map(|key| map_env_key(key.as_str()).into())
}

/// Rewrite the first `<section>_` of a lowercased env key into `<section>.`.
fn map_env_key(key: &str) -> String {
    const SECTIONS: [&str; 5] = ["service", "gateway", "openai", "analysis", "storage"];
    for section in SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(map_env_key("openai_api_key"), "openai.api_key");
        assert_eq!(map_env_key("gateway_bearer_token"), "gateway.bearer_token");
        assert_eq!(map_env_key("analysis_cooldown_secs"), "analysis.cooldown_secs");
        assert_eq!(map_env_key("storage_database_path"), "storage.database_path");
        assert_eq!(map_env_key("unrelated"), "unrelated");
    }

    #[test]
    fn env_override_applies() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SHOWROOM_OPENAI_MODEL", "gpt-4o");
            jail.set_env("SHOWROOM_ANALYSIS_FAILURE_THRESHOLD", "5");
            let config: ShowroomConfig = Figment::new()
                .merge(Serialized::defaults(ShowroomConfig::default()))
                .merge(env_provider())
                .extract()?;
            assert_eq!(config.openai.model, "gpt-4o");
            assert_eq!(config.analysis.failure_threshold, 5);
            Ok(())
        });
    }
}
