// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rule-based scorer used when the model is unavailable.
//!
//! Starts from a neutral baseline and applies additive keyword adjustments,
//! clamping only once at the end. The action, concern, and opportunity lists
//! are fixed text and do not depend on the input.

use chrono::{DateTime, Utc};
use showroom_core::types::{PRIORITY_RANGE, PROBABILITY_RANGE, SENTIMENT_RANGE};
use showroom_core::{AnalysisResult, VisitAnalysisRequest};

/// Confidence reported for every fallback result.
pub const FALLBACK_CONFIDENCE: f64 = 0.6;

const BASE_PROBABILITY: f64 = 0.5;
const BASE_PRIORITY: f64 = 5.0;
const BASE_SENTIMENT: f64 = 0.0;

const POSITIVE_KEYWORDS: [&str; 2] = ["interested", "excited"];
const BUDGET_KEYWORDS: [&str; 5] = ["budget", "price", "financing", "payment", "cost"];

/// Deterministic keyword heuristic. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackScorer;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Scores {
    probability: f64,
    priority: f64,
    sentiment: f64,
}

fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

fn adjust(request: &VisitAnalysisRequest) -> Scores {
    let mut s = Scores {
        probability: BASE_PROBABILITY,
        priority: BASE_PRIORITY,
        sentiment: BASE_SENTIMENT,
    };
    let interest = &request.visit_data.vehicle_interest;

    if has_text(interest.budget_range.as_deref()) {
        s.probability += 0.15;
        s.priority += 1.0;
    }

    if let Some(timeline) = interest.purchase_timeline.as_deref() {
        let timeline = timeline.to_lowercase();
        if timeline.contains("week") {
            s.probability += 0.25;
            s.priority += 3.0;
        } else if timeline.contains("month") {
            s.probability += 0.15;
            s.priority += 2.0;
        }
    }

    if let Some(notes) = request.visit_data.consultant_notes.as_deref() {
        let notes = notes.to_lowercase();
        if contains_any(&notes, &POSITIVE_KEYWORDS) {
            s.sentiment += 0.3;
            s.probability += 0.1;
        }
        if contains_any(&notes, &BUDGET_KEYWORDS) {
            s.probability += 0.05;
        }
    }

    if request.previous_visits() > 1 {
        s.probability += 0.1;
        s.priority += 1.0;
    }

    s
}

fn clamp_priority(raw: f64) -> u8 {
    let lo = f64::from(*PRIORITY_RANGE.start());
    let hi = f64::from(*PRIORITY_RANGE.end());
    raw.round().clamp(lo, hi) as u8
}

impl FallbackScorer {
    pub fn new() -> Self {
        Self
    }

    /// Scores a visit, stamping the result with the current time.
    pub fn score(&self, request: &VisitAnalysisRequest) -> AnalysisResult {
        self.score_at(request, Utc::now())
    }

    /// Scores a visit with an explicit generation time.
    pub fn score_at(
        &self,
        request: &VisitAnalysisRequest,
        generated_at: DateTime<Utc>,
    ) -> AnalysisResult {
        let s = adjust(request);
        AnalysisResult {
            purchase_probability: s
                .probability
                .clamp(*PROBABILITY_RANGE.start(), *PROBABILITY_RANGE.end()),
            sentiment_score: s
                .sentiment
                .clamp(*SENTIMENT_RANGE.start(), *SENTIMENT_RANGE.end()),
            priority_ranking: clamp_priority(s.priority),
            confidence_score: FALLBACK_CONFIDENCE,
            recommended_actions: vec![
                "Follow up within 48 hours".to_string(),
                "Send vehicle brochures and pricing details".to_string(),
                "Schedule a test drive".to_string(),
                "Present financing options".to_string(),
            ],
            concerns: vec![
                "Automated model analysis unavailable; scores are rule-based estimates".to_string(),
                "Budget and financing readiness not confirmed".to_string(),
            ],
            opportunities: vec![
                "Customer visited the showroom in person".to_string(),
                "Opportunity to build a relationship through personal follow-up".to_string(),
            ],
            next_contact_timing: "Within 2-3 days".to_string(),
            reasoning: "Rule-based scoring from budget, purchase timeline, consultant notes, \
                        and visit history."
                .to_string(),
            cultural_considerations: Some(
                "In Jordan, vehicle purchases are often family decisions; invite family \
                 members to a follow-up visit and allow time for consultation."
                    .to_string(),
            ),
            generated_at,
        }
    }
}
