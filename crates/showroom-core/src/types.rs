// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across adapter traits and the analysis pipeline.

use std::ops::RangeInclusive;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

use crate::error::ShowroomError;

/// Valid range for [`AnalysisResult::purchase_probability`].
pub const PROBABILITY_RANGE: RangeInclusive<f64> = 0.0..=1.0;
/// Valid range for [`AnalysisResult::sentiment_score`].
pub const SENTIMENT_RANGE: RangeInclusive<f64> = -1.0..=1.0;
/// Valid range for [`AnalysisResult::confidence_score`].
pub const CONFIDENCE_RANGE: RangeInclusive<f64> = 0.0..=1.0;
/// Valid range for [`AnalysisResult::priority_ranking`].
pub const PRIORITY_RANGE: RangeInclusive<u8> = 1..=10;

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter behind a [`crate::PluginAdapter`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Provider,
    Storage,
}

// --- Visit request types ---

/// Customer's preferred language for follow-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    Ar,
    En,
}

/// Optional customer profile attached to a visit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub language_preference: Option<Language>,
    /// Number of earlier visits recorded for this customer.
    #[serde(default)]
    pub previous_visits: Option<u32>,
}

/// What the customer said they are looking for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleInterest {
    #[serde(default, alias = "type")]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub budget_range: Option<String>,
    #[serde(default)]
    pub purchase_timeline: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub financing_preference: Option<String>,
}

/// What happened during the visit itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisitData {
    #[serde(default)]
    pub vehicle_interest: VehicleInterest,
    #[serde(default)]
    pub consultant_notes: Option<String>,
    /// Acquisition source (walk-in, referral, social media, ...).
    #[serde(default)]
    pub source: Option<String>,
    /// Visit duration in minutes.
    #[serde(default)]
    pub visit_duration: Option<u32>,
    #[serde(default)]
    pub interaction_quality: Option<String>,
}

/// Input to the analysis orchestrator.
///
/// `visit_id` deserializes to an empty string when absent so that the
/// orchestrator, not the JSON layer, reports the validation failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisitAnalysisRequest {
    #[serde(default)]
    pub visit_id: String,
    #[serde(default)]
    pub customer_data: Option<CustomerData>,
    #[serde(default)]
    pub visit_data: VisitData,
    #[serde(default)]
    pub force_reanalysis: bool,
}

impl VisitAnalysisRequest {
    /// Rejects structurally invalid requests before any work is done.
    pub fn validate(&self) -> Result<(), ShowroomError> {
        if self.visit_id.trim().is_empty() {
            return Err(ShowroomError::Validation("visit_id is required".into()));
        }
        Ok(())
    }

    /// Prior visit count, treating a missing profile as a first visit.
    pub fn previous_visits(&self) -> u32 {
        self.customer_data
            .as_ref()
            .and_then(|c| c.previous_visits)
            .unwrap_or(0)
    }
}

// --- Analysis result types ---

/// Scoring output, persisted onto the visit and returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub purchase_probability: f64,
    pub sentiment_score: f64,
    pub priority_ranking: u8,
    pub confidence_score: f64,
    #[serde(default)]
    pub recommended_actions: Vec<String>,
    #[serde(default)]
    pub concerns: Vec<String>,
    #[serde(default)]
    pub opportunities: Vec<String>,
    #[serde(default)]
    pub next_contact_timing: String,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub cultural_considerations: Option<String>,
    pub generated_at: DateTime<Utc>,
}

/// A numeric field of an [`AnalysisResult`] fell outside its valid range.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field} out of range: {value} not in [{min}, {max}]")]
pub struct RangeViolation {
    pub field: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

fn check_range(
    field: &'static str,
    value: f64,
    range: &RangeInclusive<f64>,
) -> Result<(), RangeViolation> {
    // NaN fails `contains`, which is what we want.
    if range.contains(&value) {
        Ok(())
    } else {
        Err(RangeViolation {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

impl AnalysisResult {
    /// The single schema check applied to both scoring paths before a result
    /// is persisted or returned.
    pub fn validate(&self) -> Result<(), RangeViolation> {
        check_range(
            "purchase_probability",
            self.purchase_probability,
            &PROBABILITY_RANGE,
        )?;
        check_range("sentiment_score", self.sentiment_score, &SENTIMENT_RANGE)?;
        check_range("confidence_score", self.confidence_score, &CONFIDENCE_RANGE)?;
        if !PRIORITY_RANGE.contains(&self.priority_ranking) {
            return Err(RangeViolation {
                field: "priority_ranking",
                value: f64::from(self.priority_ranking),
                min: f64::from(*PRIORITY_RANGE.start()),
                max: f64::from(*PRIORITY_RANGE.end()),
            });
        }
        Ok(())
    }

    /// True while the result is younger than `ttl` at `now`.
    ///
    /// A `generated_at` in the future counts as fresh.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        now.signed_duration_since(self.generated_at) < ttl
    }
}

/// Which scoring path produced a result.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AnalysisMethod {
    /// The language-model path.
    #[serde(rename = "openai")]
    #[strum(serialize = "openai")]
    Model,
    /// The rule-based fallback scorer.
    #[serde(rename = "fallback")]
    #[strum(serialize = "fallback")]
    Fallback,
}

/// Append-only audit record written once per non-cached analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisLogEntry {
    /// Unique record identifier (UUID v4).
    pub id: String,
    pub visit_id: String,
    pub result: AnalysisResult,
    pub method: AnalysisMethod,
    pub processing_ms: u64,
    /// True when the model path produced the result.
    pub success: bool,
    pub error_message: Option<String>,
    /// ISO 8601 timestamp.
    pub created_at: String,
}

impl AnalysisLogEntry {
    /// Build a new log entry stamped with a fresh id and the current time.
    pub fn new(
        visit_id: impl Into<String>,
        result: AnalysisResult,
        method: AnalysisMethod,
        processing_ms: u64,
        error_message: Option<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            visit_id: visit_id.into(),
            result,
            method,
            processing_ms,
            success: method == AnalysisMethod::Model,
            error_message,
            created_at: Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        }
    }
}

// --- Completion provider types ---

/// A single-shot request to a language-model completion endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub system_prompt: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Ask the endpoint to constrain its output to a JSON object.
    pub json_output: bool,
}

/// Token usage reported by the completion endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// The completion endpoint's textual answer.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    pub id: String,
    pub content: String,
    pub model: String,
    pub usage: TokenUsage,
}
