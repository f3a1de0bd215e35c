// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! What an analysis run produced, and its JSON response shape.

use serde::Serialize;
use showroom_core::{AnalysisMethod, AnalysisResult};

/// Result of one [`AnalysisService::analyze`](crate::AnalysisService::analyze) call.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    pub cached: bool,
    /// Which scorer ran. `None` for cached results.
    pub method: Option<AnalysisMethod>,
}

impl AnalysisOutcome {
    pub fn cached(result: AnalysisResult) -> Self {
        Self {
            result,
            cached: true,
            method: None,
        }
    }

    pub fn computed(result: AnalysisResult, method: AnalysisMethod) -> Self {
        Self {
            result,
            cached: false,
            method: Some(method),
        }
    }

    /// Human-readable summary returned alongside the result.
    pub fn message(&self) -> &'static str {
        match (self.cached, self.method) {
            (true, _) => "Analysis retrieved from cache",
            (false, Some(AnalysisMethod::Model)) => "AI analysis completed successfully",
            (false, _) => "Analysis completed using fallback scoring",
        }
    }

    pub fn into_response(self) -> AnalysisResponse {
        let message = self.message().to_string();
        AnalysisResponse {
            success: true,
            data: self.result,
            cached: self.cached,
            method: self.method,
            message,
        }
    }
}

/// Success body: `{ success, data, cached, method?, message }`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub data: AnalysisResult,
    pub cached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<AnalysisMethod>,
    pub message: String,
}
