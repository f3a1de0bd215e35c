// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The analysis orchestrator.

use std::sync::Arc;
use std::time::Instant;

use chrono::{TimeDelta, Utc};
use showroom_core::{
    AnalysisLog, AnalysisLogEntry, AnalysisMethod, AnalysisResult, ShowroomError,
    VisitAnalysisRequest, VisitStore,
};
use showroom_resilience::CircuitBreaker;
use showroom_scoring::{FallbackScorer, ModelScorer};
use tracing::{debug, info, warn};

use crate::outcome::AnalysisOutcome;

/// Stored analyses younger than this are served from cache.
pub const DEFAULT_CACHE_TTL: TimeDelta = TimeDelta::hours(24);

const BREAKER_OPEN: &str = "circuit breaker open";
const MODEL_DISABLED: &str = "model scoring disabled";

/// Orchestrates cache lookup, scoring, persistence, and audit logging.
pub struct AnalysisService {
    model: Option<ModelScorer>,
    fallback: FallbackScorer,
    breaker: Arc<CircuitBreaker>,
    visits: Arc<dyn VisitStore>,
    log: Arc<dyn AnalysisLog>,
    cache_ttl: TimeDelta,
}

impl AnalysisService {
    /// Creates a service that tries the model before falling back.
    pub fn new(
        model: ModelScorer,
        breaker: Arc<CircuitBreaker>,
        visits: Arc<dyn VisitStore>,
        log: Arc<dyn AnalysisLog>,
    ) -> Self {
        Self {
            model: Some(model),
            fallback: FallbackScorer::new(),
            breaker,
            visits,
            log,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    /// Creates a service that always uses the fallback scorer.
    pub fn offline(
        breaker: Arc<CircuitBreaker>,
        visits: Arc<dyn VisitStore>,
        log: Arc<dyn AnalysisLog>,
    ) -> Self {
        Self {
            model: None,
            fallback: FallbackScorer::new(),
            breaker,
            visits,
            log,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    pub fn with_cache_ttl(mut self, ttl: TimeDelta) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn breaker(&self) -> &Arc<CircuitBreaker> {
        &self.breaker
    }

    pub fn visits(&self) -> &Arc<dyn VisitStore> {
        &self.visits
    }

    pub fn log(&self) -> &Arc<dyn AnalysisLog> {
        &self.log
    }

    /// Analyzes one visit.
    ///
    /// Fails only with [`ShowroomError::Validation`] for a missing
    /// `visit_id`, or [`ShowroomError::Internal`] if a scorer produced a
    /// result outside the valid ranges. Model, storage, and log failures
    /// are logged and absorbed.
    pub async fn analyze(
        &self,
        request: &VisitAnalysisRequest,
    ) -> Result<AnalysisOutcome, ShowroomError> {
        request.validate()?;
        let started = Instant::now();
        let visit_id = request.visit_id.as_str();

        if !request.force_reanalysis
            && let Some(result) = self.cached(visit_id).await
        {
            info!(visit_id, "analysis served from cache");
            return Ok(AnalysisOutcome::cached(result));
        }

        let (result, method, error_message) = self.score(request).await;
        result.validate().map_err(|v| {
            ShowroomError::Internal(format!("{method} scorer produced an invalid result: {v}"))
        })?;

        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        if let Err(e) = self.visits.update_analysis(visit_id, &result).await {
            warn!(visit_id, error = %e, "failed to persist analysis");
        }
        let entry =
            AnalysisLogEntry::new(visit_id, result.clone(), method, duration_ms, error_message);
        if let Err(e) = self.log.append(&entry).await {
            warn!(visit_id, error = %e, "failed to append analysis log entry");
        }

        info!(visit_id, %method, duration_ms, "analysis completed");
        Ok(AnalysisOutcome::computed(result, method))
    }

    /// Returns the stored analysis if it is fresh and still valid.
    async fn cached(&self, visit_id: &str) -> Option<AnalysisResult> {
        let stored = match self.visits.get_analysis(visit_id).await {
            Ok(stored) => stored?,
            Err(e) => {
                warn!(visit_id, error = %e, "cache lookup failed, recomputing");
                return None;
            }
        };
        if !stored.is_fresh(Utc::now(), self.cache_ttl) {
            debug!(visit_id, generated_at = %stored.generated_at, "stored analysis is stale");
            return None;
        }
        if let Err(v) = stored.validate() {
            warn!(visit_id, error = %v, "stored analysis is invalid, recomputing");
            return None;
        }
        Some(stored)
    }

    /// Runs the model when allowed, otherwise the fallback. Never fails.
    async fn score(
        &self,
        request: &VisitAnalysisRequest,
    ) -> (AnalysisResult, AnalysisMethod, Option<String>) {
        let Some(model) = &self.model else {
            return (
                self.fallback.score(request),
                AnalysisMethod::Fallback,
                Some(MODEL_DISABLED.to_string()),
            );
        };

        if self.breaker.is_open() {
            info!(
                visit_id = %request.visit_id,
                failure_count = self.breaker.failure_count(),
                "circuit breaker open, using fallback scoring"
            );
            return (
                self.fallback.score(request),
                AnalysisMethod::Fallback,
                Some(BREAKER_OPEN.to_string()),
            );
        }

        match model.score(request).await {
            Ok(result) => {
                self.breaker.record_success();
                (result, AnalysisMethod::Model, None)
            }
            Err(e) => {
                self.breaker.record_failure();
                warn!(
                    visit_id = %request.visit_id,
                    error = %e,
                    failure_count = self.breaker.failure_count(),
                    "model scoring failed, using fallback"
                );
                (
                    self.fallback.score(request),
                    AnalysisMethod::Fallback,
                    Some(e.to_string()),
                )
            }
        }
    }
}
