// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness wiring an [`AnalysisService`] from mocks.
//!
//! The breaker runs on a [`ManualClock`] so cool-down expiry can be driven
//! with [`TestHarness::advance`].

use std::sync::Arc;
use std::time::Duration;

use chrono::TimeDelta;
use showroom_analysis::{AnalysisOutcome, AnalysisService};
use showroom_core::{
    CustomerData, ShowroomError, VehicleInterest, VisitAnalysisRequest, VisitData,
};
use showroom_resilience::{CircuitBreaker, CircuitBreakerConfig, ManualClock};
use showroom_scoring::{ModelScorer, ModelSettings};

use crate::memory::{MemoryAnalysisLog, MemoryVisitStore};
use crate::mock_provider::MockProvider;

/// A request with the given id and no other data.
pub fn visit_request(visit_id: &str) -> VisitAnalysisRequest {
    VisitAnalysisRequest {
        visit_id: visit_id.to_string(),
        ..Default::default()
    }
}

/// Builder for [`TestHarness`].
pub struct TestHarnessBuilder {
    provider: MockProvider,
    breaker: CircuitBreakerConfig,
    cache_ttl: Option<TimeDelta>,
    offline: bool,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            provider: MockProvider::new(),
            breaker: CircuitBreakerConfig::default(),
            cache_ttl: None,
            offline: false,
        }
    }

    /// Uses the given provider instead of a default [`MockProvider`].
    pub fn with_provider(mut self, provider: MockProvider) -> Self {
        self.provider = provider;
        self
    }

    /// Makes every model call fail.
    pub fn with_failing_model(mut self) -> Self {
        self.provider = MockProvider::always_failing();
        self
    }

    pub fn with_breaker(mut self, config: CircuitBreakerConfig) -> Self {
        self.breaker = config;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: TimeDelta) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    /// Builds a service without a model path.
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    pub fn build(self) -> TestHarness {
        let provider = Arc::new(self.provider);
        let clock = Arc::new(ManualClock::new());
        let breaker = Arc::new(CircuitBreaker::with_clock(self.breaker, clock.clone()));
        let visits = Arc::new(MemoryVisitStore::new());
        let log = Arc::new(MemoryAnalysisLog::new());

        let service = if self.offline {
            AnalysisService::offline(breaker.clone(), visits.clone(), log.clone())
        } else {
            let scorer = ModelScorer::new(
                provider.clone(),
                ModelSettings {
                    model: "mock-model".to_string(),
                    timeout: Duration::from_secs(5),
                    ..ModelSettings::default()
                },
            );
            AnalysisService::new(scorer, breaker.clone(), visits.clone(), log.clone())
        };
        let service = match self.cache_ttl {
            Some(ttl) => service.with_cache_ttl(ttl),
            None => service,
        };

        TestHarness {
            service: Arc::new(service),
            provider,
            breaker,
            clock,
            visits,
            log,
        }
    }
}

/// An analysis service over mock collaborators.
pub struct TestHarness {
    pub service: Arc<AnalysisService>,
    pub provider: Arc<MockProvider>,
    pub breaker: Arc<CircuitBreaker>,
    pub clock: Arc<ManualClock>,
    pub visits: Arc<MemoryVisitStore>,
    pub log: Arc<MemoryAnalysisLog>,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Harness with a working mock model and default settings.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub async fn analyze(
        &self,
        request: &VisitAnalysisRequest,
    ) -> Result<AnalysisOutcome, ShowroomError> {
        self.service.analyze(request).await
    }

    /// Moves the breaker clock forward.
    pub fn advance(&self, by: Duration) {
        self.clock.advance(by);
    }

    /// A request filled in the way a consultant typically submits it.
    pub fn sample_request(visit_id: &str) -> VisitAnalysisRequest {
        VisitAnalysisRequest {
            visit_id: visit_id.to_string(),
            customer_data: Some(CustomerData {
                name: Some("Lina".to_string()),
                previous_visits: Some(2),
                ..Default::default()
            }),
            visit_data: VisitData {
                vehicle_interest: VehicleInterest {
                    vehicle_type: Some("SUV".to_string()),
                    budget_range: Some("25000-35000".to_string()),
                    purchase_timeline: Some("within_month".to_string()),
                    ..Default::default()
                },
                ..Default::default()
            },
            force_reanalysis: false,
        }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
