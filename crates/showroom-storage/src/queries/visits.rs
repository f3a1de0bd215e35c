// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stored analysis per visit.

use rusqlite::{OptionalExtension, params};
use showroom_core::{AnalysisResult, ShowroomError};

use crate::database::{Database, map_tr_err};
use crate::queries::decode_err;

/// Returns the stored analysis for `visit_id`, if the visit has one.
pub async fn get_analysis(
    db: &Database,
    visit_id: &str,
) -> Result<Option<AnalysisResult>, ShowroomError> {
    let visit_id = visit_id.to_string();
    let raw: Option<String> = db
        .connection()
        .call(move |conn| -> Result<Option<String>, rusqlite::Error> {
            let analysis = conn
                .query_row(
                    "SELECT analysis FROM visits WHERE id = ?1",
                    params![visit_id],
                    |row| row.get::<_, Option<String>>(0),
                )
                .optional()?;
            Ok(analysis.flatten())
        })
        .await
        .map_err(map_tr_err)?;

    raw.map(|json| serde_json::from_str(&json).map_err(decode_err))
        .transpose()
}

/// Stores `result` as the visit's analysis, creating the visit row if needed.
pub async fn update_analysis(
    db: &Database,
    visit_id: &str,
    result: &AnalysisResult,
) -> Result<(), ShowroomError> {
    let visit_id = visit_id.to_string();
    let json = serde_json::to_string(result).map_err(decode_err)?;
    let analyzed_at = result.generated_at.to_rfc3339();

    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO visits (id, analysis, analyzed_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET
                     analysis = excluded.analysis,
                     analyzed_at = excluded.analyzed_at,
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
                params![visit_id, json, analyzed_at],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}
