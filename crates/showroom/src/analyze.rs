// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `showroom analyze` command: one analysis, printed as the HTTP body would be.

use std::path::Path;

use showroom_config::model::ShowroomConfig;
use showroom_core::{ShowroomError, StorageAdapter, VisitAnalysisRequest};

use crate::serve::{build_service, init_tracing, open_storage};

/// Reads a request from `file`, analyzes it and prints the response JSON.
pub async fn run_analyze(
    config: ShowroomConfig,
    file: &Path,
    offline: bool,
) -> Result<(), ShowroomError> {
    init_tracing(&config.service.log_level);

    let request = read_request(file)?;
    let storage = open_storage(&config).await?;
    let service = build_service(&config, storage.clone(), offline)?;

    let outcome = service.analyze(&request).await;
    storage.close().await?;

    let body = serde_json::to_string_pretty(&outcome?.into_response())
        .map_err(|e| ShowroomError::Internal(format!("cannot render response: {e}")))?;
    println!("{body}");
    Ok(())
}

fn read_request(file: &Path) -> Result<VisitAnalysisRequest, ShowroomError> {
    let raw = std::fs::read_to_string(file).map_err(|e| {
        ShowroomError::Validation(format!("cannot read {}: {e}", file.display()))
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        ShowroomError::Validation(format!("invalid request in {}: {e}", file.display()))
    })
}
