// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes.

use crate::diagnostic::ConfigError;
use crate::model::ShowroomConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ShowroomConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let host = config.gateway.host.trim();
    if host.is_empty() {
        fail("gateway.host must not be empty".to_string());
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            fail(format!(
                "gateway.host `{host}` is not a valid IP address or hostname"
            ));
        }
    }

    if config.gateway.port == 0 {
        fail("gateway.port must not be 0".to_string());
    }

    if config.storage.database_path.trim().is_empty() {
        fail("storage.database_path must not be empty".to_string());
    }

    let temperature = config.openai.temperature;
    if !(0.0..=2.0).contains(&temperature) {
        fail(format!(
            "openai.temperature must be between 0 and 2, got {temperature}"
        ));
    }

    if config.openai.timeout_secs == 0 {
        fail("openai.timeout_secs must be at least 1".to_string());
    }

    if config.openai.model.trim().is_empty() {
        fail("openai.model must not be empty".to_string());
    }

    if config.analysis.failure_threshold == 0 {
        fail("analysis.failure_threshold must be at least 1".to_string());
    }

    if config.analysis.cooldown_secs == 0 {
        fail("analysis.cooldown_secs must be at least 1".to_string());
    }

    if config.analysis.cache_ttl_hours == 0 {
        fail("analysis.cache_ttl_hours must be at least 1".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_error(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&ShowroomConfig::default()).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = ShowroomConfig::default();
        config.storage.database_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "database_path"));
    }

    #[test]
    fn bad_host_fails_validation() {
        let mut config = ShowroomConfig::default();
        config.gateway.host = "not a host!".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "gateway.host"));
    }

    #[test]
    fn temperature_out_of_range_fails_validation() {
        let mut config = ShowroomConfig::default();
        config.openai.temperature = 3.5;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "openai.temperature"));
    }

    #[test]
    fn zero_breaker_settings_fail_validation() {
        let mut config = ShowroomConfig::default();
        config.analysis.failure_threshold = 0;
        config.analysis.cooldown_secs = 0;
        config.analysis.cache_ttl_hours = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3, "all errors are collected: {errors:?}");
        assert!(has_error(&errors, "failure_threshold"));
        assert!(has_error(&errors, "cooldown_secs"));
        assert!(has_error(&errors, "cache_ttl_hours"));
    }

    #[test]
    fn valid_custom_config_passes() {
        let mut config = ShowroomConfig::default();
        config.gateway.host = "0.0.0.0".to_string();
        config.storage.database_path = "/tmp/showroom.db".to_string();
        config.openai.temperature = 0.0;
        assert!(validate_config(&config).is_ok());
    }
}
