// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Showroom integration tests.
//!
//! Provides mock collaborators and a harness for fast, deterministic tests
//! without network access or a database.
//!
//! # Components
//!
//! - [`MockProvider`] - scripted completion provider with a call counter
//! - [`MemoryVisitStore`] / [`MemoryAnalysisLog`] - in-memory stores with failure injection
//! - [`TestHarness`] - an [`AnalysisService`](showroom_analysis::AnalysisService) wired from the above

pub mod harness;
pub mod memory;
pub mod mock_provider;

pub use harness::{TestHarness, TestHarnessBuilder, visit_request};
pub use memory::{MemoryAnalysisLog, MemoryVisitStore};
pub use mock_provider::{MockProvider, valid_analysis_json};
pub use showroom_resilience::ManualClock;
