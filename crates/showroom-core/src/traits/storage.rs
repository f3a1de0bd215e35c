// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage traits: the visit record store and the append-only analysis log.

use async_trait::async_trait;

use crate::error::ShowroomError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{AnalysisLogEntry, AnalysisResult};

/// Lifecycle for a persistent storage backend.
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Initializes the storage backend (migrations, connection, etc.).
    async fn initialize(&self) -> Result<(), ShowroomError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), ShowroomError>;
}

/// Holds the latest analysis for each visit.
#[async_trait]
pub trait VisitStore: Send + Sync {
    /// Returns the stored analysis for a visit, if any.
    async fn get_analysis(&self, visit_id: &str) -> Result<Option<AnalysisResult>, ShowroomError>;

    /// Stores `result` as the visit's analysis, replacing any prior one.
    async fn update_analysis(
        &self,
        visit_id: &str,
        result: &AnalysisResult,
    ) -> Result<(), ShowroomError>;
}

/// Append-only audit trail of analysis runs.
#[async_trait]
pub trait AnalysisLog: Send + Sync {
    /// Appends one entry. Entries are never updated or deleted.
    async fn append(&self, entry: &AnalysisLogEntry) -> Result<(), ShowroomError>;

    /// Lists the entries recorded for a visit, newest first.
    async fn list_for_visit(&self, visit_id: &str) -> Result<Vec<AnalysisLogEntry>, ShowroomError>;
}
