// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the storage traits.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use showroom_config::model::StorageConfig;
use showroom_core::{
    AdapterType, AnalysisLog, AnalysisLogEntry, AnalysisResult, HealthStatus, PluginAdapter,
    ShowroomError, StorageAdapter, VisitStore,
};

use crate::database::{Database, map_tr_err};
use crate::queries;

/// SQLite-backed visit store and analysis log.
///
/// The database is opened by [`StorageAdapter::initialize`]; every other
/// operation fails until then.
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Wraps an already opened database.
    pub fn from_database(db: Database) -> Self {
        Self {
            config: StorageConfig {
                database_path: ":memory:".to_string(),
                wal_mode: false,
            },
            db: OnceCell::new_with(Some(db)),
        }
    }

    fn db(&self) -> Result<&Database, ShowroomError> {
        self.db.get().ok_or_else(|| ShowroomError::Persistence {
            source: "storage not initialized, call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, ShowroomError> {
        self.db()?
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), ShowroomError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| ShowroomError::Persistence {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), ShowroomError> {
        let db = self.db()?;
        if self.config.wal_mode {
            db.checkpoint().await?;
            debug!("WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl VisitStore for SqliteStorage {
    async fn get_analysis(&self, visit_id: &str) -> Result<Option<AnalysisResult>, ShowroomError> {
        queries::visits::get_analysis(self.db()?, visit_id).await
    }

    async fn update_analysis(
        &self,
        visit_id: &str,
        result: &AnalysisResult,
    ) -> Result<(), ShowroomError> {
        queries::visits::update_analysis(self.db()?, visit_id, result).await
    }
}

#[async_trait]
impl AnalysisLog for SqliteStorage {
    async fn append(&self, entry: &AnalysisLogEntry) -> Result<(), ShowroomError> {
        queries::analysis_log::append(self.db()?, entry).await
    }

    async fn list_for_visit(&self, visit_id: &str) -> Result<Vec<AnalysisLogEntry>, ShowroomError> {
        queries::analysis_log::list_for_visit(self.db()?, visit_id).await
    }
}
