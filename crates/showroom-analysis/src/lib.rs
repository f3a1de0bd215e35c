// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Visit analysis orchestrator.
//!
//! [`AnalysisService::analyze`] is the single entry point. It serves a fresh
//! cached result when one exists, otherwise gates the model call through the
//! circuit breaker, falls back to rule-based scoring on any model failure,
//! and records the outcome. Only a request without a `visit_id` fails.

pub mod outcome;
pub mod service;
pub mod settings;

pub use outcome::{AnalysisOutcome, AnalysisResponse};
pub use service::{AnalysisService, DEFAULT_CACHE_TTL};
