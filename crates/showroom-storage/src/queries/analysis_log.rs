// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only analysis log.

use std::str::FromStr;

use rusqlite::params;
use showroom_core::{AnalysisLogEntry, AnalysisMethod, ShowroomError};

use crate::database::{Database, map_tr_err};
use crate::queries::decode_err;

struct LogRow {
    id: String,
    visit_id: String,
    result: String,
    method: String,
    processing_ms: i64,
    success: bool,
    error_message: Option<String>,
    created_at: String,
}

impl LogRow {
    fn decode(self) -> Result<AnalysisLogEntry, ShowroomError> {
        let method = AnalysisMethod::from_str(&self.method).map_err(decode_err)?;
        Ok(AnalysisLogEntry {
            id: self.id,
            visit_id: self.visit_id,
            result: serde_json::from_str(&self.result).map_err(decode_err)?,
            method,
            processing_ms: u64::try_from(self.processing_ms).unwrap_or(0),
            success: self.success,
            error_message: self.error_message,
            created_at: self.created_at,
        })
    }
}

/// Appends one log entry.
pub async fn append(db: &Database, entry: &AnalysisLogEntry) -> Result<(), ShowroomError> {
    let result = serde_json::to_string(&entry.result).map_err(decode_err)?;
    let id = entry.id.clone();
    let visit_id = entry.visit_id.clone();
    let method = entry.method.to_string();
    let processing_ms = i64::try_from(entry.processing_ms).unwrap_or(i64::MAX);
    let success = entry.success;
    let error_message = entry.error_message.clone();
    let created_at = entry.created_at.clone();

    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO analysis_log (id, visit_id, result, method, processing_ms, \
                 success, error_message, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    id,
                    visit_id,
                    result,
                    method,
                    processing_ms,
                    success,
                    error_message,
                    created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Lists a visit's log entries, newest first.
pub async fn list_for_visit(
    db: &Database,
    visit_id: &str,
) -> Result<Vec<AnalysisLogEntry>, ShowroomError> {
    let visit_id = visit_id.to_string();
    let rows = db
        .connection()
        .call(move |conn| -> Result<Vec<LogRow>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, visit_id, result, method, processing_ms, success, error_message, \
                 created_at FROM analysis_log WHERE visit_id = ?1 \
                 ORDER BY created_at DESC, rowid DESC",
            )?;
            let rows = stmt.query_map(params![visit_id], |row| {
                Ok(LogRow {
                    id: row.get(0)?,
                    visit_id: row.get(1)?,
                    result: row.get(2)?,
                    method: row.get(3)?,
                    processing_ms: row.get(4)?,
                    success: row.get(5)?,
                    error_message: row.get(6)?,
                    created_at: row.get(7)?,
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)?;

    rows.into_iter().map(LogRow::decode).collect()
}
