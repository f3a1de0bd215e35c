// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model-backed scorer.
//!
//! Sends the rendered visit to a [`CompletionProvider`] and parses the reply
//! into an [`AnalysisResult`]. Every failure mode (transport error, non-2xx,
//! timeout, malformed JSON, missing or out-of-range numbers) is reported as
//! [`ShowroomError::Upstream`] so the orchestrator can count it against the
//! circuit breaker.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use showroom_core::{
    AnalysisResult, CompletionProvider, CompletionRequest, ShowroomError, VisitAnalysisRequest,
};
use tracing::debug;

use crate::prompt::{SYSTEM_PROMPT, build_prompt};

/// Sampling and timeout settings for model calls.
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.3,
            max_tokens: 1500,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Scores visits through a language model.
#[derive(Clone)]
pub struct ModelScorer {
    provider: Arc<dyn CompletionProvider>,
    settings: ModelSettings,
}

impl ModelScorer {
    pub fn new(provider: Arc<dyn CompletionProvider>, settings: ModelSettings) -> Self {
        Self { provider, settings }
    }

    pub fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    /// Scores one visit. Never retries.
    pub async fn score(
        &self,
        request: &VisitAnalysisRequest,
    ) -> Result<AnalysisResult, ShowroomError> {
        let completion = CompletionRequest {
            model: self.settings.model.clone(),
            system_prompt: SYSTEM_PROMPT.to_string(),
            prompt: build_prompt(request),
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
            json_output: true,
        };

        let response = tokio::time::timeout(self.settings.timeout, self.provider.complete(completion))
            .await
            .map_err(|_| ShowroomError::Upstream {
                message: format!("model call timed out after {:?}", self.settings.timeout),
                source: Some(Box::new(ShowroomError::Timeout {
                    duration: self.settings.timeout,
                })),
            })?
            .map_err(into_upstream)?;

        debug!(
            visit_id = %request.visit_id,
            model = %response.model,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "model completion received"
        );

        parse_model_output(&response.content, Utc::now())
    }
}

fn into_upstream(err: ShowroomError) -> ShowroomError {
    match err {
        e @ ShowroomError::Upstream { .. } => e,
        other => ShowroomError::Upstream {
            message: other.to_string(),
            source: Some(Box::new(other)),
        },
    }
}

/// The model's JSON answer. Numeric fields are required; nothing is coerced.
#[derive(Debug, Deserialize)]
struct ModelOutput {
    purchase_probability: f64,
    sentiment_score: f64,
    priority_ranking: f64,
    confidence_score: f64,
    #[serde(default)]
    recommended_actions: Vec<String>,
    #[serde(default)]
    concerns: Vec<String>,
    #[serde(default)]
    opportunities: Vec<String>,
    #[serde(default)]
    next_contact_timing: String,
    #[serde(default)]
    reasoning: String,
    #[serde(default)]
    cultural_considerations: Option<String>,
}

/// Strips a Markdown code fence if the model wrapped its JSON in one.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Parses the model's reply into a validated [`AnalysisResult`].
pub fn parse_model_output(
    content: &str,
    generated_at: DateTime<Utc>,
) -> Result<AnalysisResult, ShowroomError> {
    let output: ModelOutput =
        serde_json::from_str(strip_code_fence(content)).map_err(|e| ShowroomError::Upstream {
            message: format!("unparseable model output: {e}"),
            source: Some(Box::new(e)),
        })?;

    let priority = output.priority_ranking;
    if priority.fract() != 0.0 || !(1.0..=10.0).contains(&priority) {
        return Err(ShowroomError::upstream(format!(
            "priority_ranking must be an integer in [1, 10], got {priority}"
        )));
    }

    let result = AnalysisResult {
        purchase_probability: output.purchase_probability,
        sentiment_score: output.sentiment_score,
        priority_ranking: priority as u8,
        confidence_score: output.confidence_score,
        recommended_actions: output.recommended_actions,
        concerns: output.concerns,
        opportunities: output.opportunities,
        next_contact_timing: output.next_contact_timing,
        reasoning: output.reasoning,
        cultural_considerations: output.cultural_considerations,
        generated_at,
    };

    result.validate().map_err(|v| ShowroomError::Upstream {
        message: format!("model output rejected: {v}"),
        source: Some(Box::new(v)),
    })?;
    Ok(result)
}
