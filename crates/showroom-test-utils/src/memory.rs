// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory visit store and analysis log with failure injection.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use showroom_core::{AnalysisLog, AnalysisLogEntry, AnalysisResult, ShowroomError, VisitStore};

fn injected(what: &str) -> ShowroomError {
    ShowroomError::Persistence {
        source: format!("injected {what} failure").into(),
    }
}

/// Visit store backed by a `HashMap`.
#[derive(Default)]
pub struct MemoryVisitStore {
    analyses: Mutex<HashMap<String, AnalysisResult>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryVisitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a stored analysis without counting it as a write.
    pub async fn insert(&self, visit_id: &str, result: AnalysisResult) {
        self.analyses.lock().await.insert(visit_id.to_string(), result);
    }

    pub async fn get(&self, visit_id: &str) -> Option<AnalysisResult> {
        self.analyses.lock().await.get(visit_id).cloned()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of `update_analysis` calls that succeeded.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VisitStore for MemoryVisitStore {
    async fn get_analysis(&self, visit_id: &str) -> Result<Option<AnalysisResult>, ShowroomError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(injected("read"));
        }
        Ok(self.get(visit_id).await)
    }

    async fn update_analysis(
        &self,
        visit_id: &str,
        result: &AnalysisResult,
    ) -> Result<(), ShowroomError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(injected("write"));
        }
        self.insert(visit_id, result.clone()).await;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Analysis log backed by a `Vec`.
#[derive(Default)]
pub struct MemoryAnalysisLog {
    entries: Mutex<Vec<AnalysisLogEntry>>,
    fail_appends: AtomicBool,
}

impl MemoryAnalysisLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::SeqCst);
    }

    /// All entries in append order.
    pub async fn entries(&self) -> Vec<AnalysisLogEntry> {
        self.entries.lock().await.clone()
    }
}

#[async_trait]
impl AnalysisLog for MemoryAnalysisLog {
    async fn append(&self, entry: &AnalysisLogEntry) -> Result<(), ShowroomError> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(injected("append"));
        }
        self.entries.lock().await.push(entry.clone());
        Ok(())
    }

    async fn list_for_visit(&self, visit_id: &str) -> Result<Vec<AnalysisLogEntry>, ShowroomError> {
        Ok(self
            .entries
            .lock()
            .await
            .iter()
            .rev()
            .filter(|e| e.visit_id == visit_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use showroom_core::AnalysisMethod;

    fn result() -> AnalysisResult {
        AnalysisResult {
            purchase_probability: 0.5,
            sentiment_score: 0.0,
            priority_ranking: 5,
            confidence_score: 0.6,
            recommended_actions: vec![],
            concerns: vec![],
            opportunities: vec![],
            next_contact_timing: String::new(),
            reasoning: String::new(),
            cultural_considerations: None,
            generated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn visit_store_failure_injection() {
        let store = MemoryVisitStore::new();
        store.update_analysis("v1", &result()).await.unwrap();
        assert_eq!(store.write_count(), 1);

        store.set_fail_writes(true);
        assert!(store.update_analysis("v1", &result()).await.is_err());
        assert_eq!(store.write_count(), 1);

        store.set_fail_reads(true);
        assert!(store.get_analysis("v1").await.is_err());
    }

    #[tokio::test]
    async fn log_lists_newest_first_per_visit() {
        let log = MemoryAnalysisLog::new();
        let a = AnalysisLogEntry::new("v1", result(), AnalysisMethod::Model, 1, None);
        let b = AnalysisLogEntry::new("v2", result(), AnalysisMethod::Model, 1, None);
        let c = AnalysisLogEntry::new("v1", result(), AnalysisMethod::Fallback, 1, None);
        for e in [&a, &b, &c] {
            log.append(e).await.unwrap();
        }
        let listed = log.list_for_visit("v1").await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, c.id);
        assert_eq!(listed[1].id, a.id);

        log.set_fail_appends(true);
        assert!(log.append(&a).await.is_err());
        assert_eq!(log.entries().await.len(), 3);
    }
}
