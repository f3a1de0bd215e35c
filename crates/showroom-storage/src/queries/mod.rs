// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed queries over the visit and audit-log tables.

pub mod analysis_log;
pub mod visits;

use showroom_core::ShowroomError;

pub(crate) fn decode_err(e: impl std::error::Error + Send + Sync + 'static) -> ShowroomError {
    ShowroomError::Persistence {
        source: Box::new(e),
    }
}
