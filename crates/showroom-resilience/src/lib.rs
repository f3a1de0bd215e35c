// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resilience primitives for the Showroom visit-analysis service.
//!
//! - **Circuit breaker**: stops calling the language model for a cool-down
//!   window after repeated consecutive failures.
//! - **Clock**: injectable monotonic time source so breaker behavior can be
//!   driven deterministically in tests.

pub mod circuit_breaker;
pub mod clock;

pub use circuit_breaker::{
    BreakerSnapshot, BreakerState, CircuitBreaker, CircuitBreakerConfig, Evaluation, evaluate,
};
pub use clock::{Clock, ManualClock, SystemClock};
