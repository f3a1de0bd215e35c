// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversions from configuration sections to component settings.

use chrono::TimeDelta;
use showroom_config::model::{AnalysisConfig, OpenAiConfig};
use showroom_resilience::CircuitBreakerConfig;
use showroom_scoring::ModelSettings;

pub fn breaker_config(config: &AnalysisConfig) -> CircuitBreakerConfig {
    CircuitBreakerConfig {
        failure_threshold: config.failure_threshold,
        cooldown: config.cooldown(),
    }
}

pub fn cache_ttl(config: &AnalysisConfig) -> TimeDelta {
    TimeDelta::hours(i64::from(config.cache_ttl_hours))
}

pub fn model_settings(config: &OpenAiConfig) -> ModelSettings {
    ModelSettings {
        model: config.model.clone(),
        temperature: config.temperature,
        max_tokens: config.max_tokens,
        timeout: config.timeout(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn defaults_map_through() {
        let analysis = AnalysisConfig::default();
        let breaker = breaker_config(&analysis);
        assert_eq!(breaker.failure_threshold, 3);
        assert_eq!(breaker.cooldown, Duration::from_secs(60));
        assert_eq!(cache_ttl(&analysis), TimeDelta::hours(24));

        let model = model_settings(&OpenAiConfig::default());
        assert_eq!(model.model, "gpt-4o-mini");
        assert_eq!(model.max_tokens, 1500);
        assert_eq!(model.timeout, Duration::from_secs(30));
    }
}
