// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Showroom visit-analysis service.
//!
//! This crate provides the error taxonomy, the visit and analysis domain
//! types (including the shared [`AnalysisResult`] range validator), and the
//! adapter traits for the collaborators the analysis core consumes.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ShowroomError;
pub use types::{
    AdapterType, AnalysisLogEntry, AnalysisMethod, AnalysisResult, CompletionRequest,
    CompletionResponse, CustomerData, HealthStatus, Language, RangeViolation, TokenUsage,
    VehicleInterest, VisitAnalysisRequest, VisitData,
};

pub use traits::{
    AnalysisLog, CompletionProvider, PluginAdapter, StorageAdapter, VisitStore,
};
