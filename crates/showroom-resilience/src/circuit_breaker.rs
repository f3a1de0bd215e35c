// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Consecutive-failure circuit breaker guarding the language-model call.
//!
//! Two states only: `Closed` (calls permitted) and `Open` (calls skipped in
//! favor of the fallback scorer). There is no background timer. Whether the
//! breaker is open is a pure function of `(failure_count, last_failure, now)`,
//! see [`evaluate`]; once the cool-down has elapsed since the last recorded
//! failure, the next [`CircuitBreaker::is_open`] call resets the counters.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};

/// Breaker tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures that open the breaker.
    pub failure_threshold: u32,
    /// Time after the last failure before the breaker closes again.
    pub cooldown: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 3,
            cooldown: Duration::from_secs(60),
        }
    }
}

/// Externally visible breaker state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BreakerState {
    Closed,
    Open,
}

/// Outcome of evaluating breaker counters at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// Calls are permitted and the counters stay as they are.
    Closed,
    /// Threshold reached inside the cool-down window.
    Open,
    /// The cool-down elapsed since the last failure; counters must be reset.
    Expired,
}

/// Decides the breaker state from its counters.
pub fn evaluate(
    config: &CircuitBreakerConfig,
    failure_count: u32,
    last_failure: Option<Instant>,
    now: Instant,
) -> Evaluation {
    let Some(last) = last_failure else {
        return Evaluation::Closed;
    };
    if now.saturating_duration_since(last) >= config.cooldown {
        return Evaluation::Expired;
    }
    if failure_count >= config.failure_threshold {
        Evaluation::Open
    } else {
        Evaluation::Closed
    }
}

/// Point-in-time view of the breaker for health reporting.
#[derive(Debug, Clone, Serialize)]
pub struct BreakerSnapshot {
    pub state: BreakerState,
    pub failure_count: u32,
    /// Seconds since the last recorded failure, if any.
    pub last_failure_age_secs: Option<u64>,
}

#[derive(Debug, Default)]
struct Inner {
    failure_count: u32,
    last_failure: Option<Instant>,
}

impl Inner {
    fn reset(&mut self) {
        self.failure_count = 0;
        self.last_failure = None;
    }
}

/// Process-local breaker shared by every analysis in flight.
pub struct CircuitBreaker {
    config: CircuitBreakerConfig,
    clock: Arc<dyn Clock>,
    inner: Mutex<Inner>,
}

impl std::fmt::Debug for CircuitBreaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CircuitBreaker")
            .field("config", &self.config)
            .field("inner", &*self.lock())
            .finish_non_exhaustive()
    }
}

impl CircuitBreaker {
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: CircuitBreakerConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn config(&self) -> &CircuitBreakerConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns `true` while model calls should be skipped.
    ///
    /// Resets the counters when the cool-down has elapsed.
    pub fn is_open(&self) -> bool {
        let now = self.clock.now();
        let mut inner = self.lock();
        match evaluate(&self.config, inner.failure_count, inner.last_failure, now) {
            Evaluation::Open => true,
            Evaluation::Closed => false,
            Evaluation::Expired => {
                if inner.failure_count >= self.config.failure_threshold {
                    debug!("circuit breaker cool-down elapsed, closing");
                }
                inner.reset();
                false
            }
        }
    }

    /// Counts a failed model call.
    pub fn record_failure(&self) {
        let now = self.clock.now();
        let mut inner = self.lock();
        inner.failure_count = inner.failure_count.saturating_add(1);
        inner.last_failure = Some(now);
        if inner.failure_count == self.config.failure_threshold {
            warn!(
                failure_count = inner.failure_count,
                cooldown_secs = self.config.cooldown.as_secs(),
                "circuit breaker opened"
            );
        }
    }

    /// Clears all failure history after a successful model call.
    pub fn record_success(&self) {
        self.lock().reset();
    }

    pub fn failure_count(&self) -> u32 {
        self.lock().failure_count
    }

    /// Reports the current state without mutating it.
    pub fn snapshot(&self) -> BreakerSnapshot {
        let now = self.clock.now();
        let inner = self.lock();
        let state = match evaluate(&self.config, inner.failure_count, inner.last_failure, now) {
            Evaluation::Open => BreakerState::Open,
            Evaluation::Closed | Evaluation::Expired => BreakerState::Closed,
        };
        BreakerSnapshot {
            state,
            failure_count: inner.failure_count,
            last_failure_age_secs: inner
                .last_failure
                .map(|t| now.saturating_duration_since(t).as_secs()),
        }
    }
}
