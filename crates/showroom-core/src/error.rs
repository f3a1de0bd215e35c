// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Showroom visit-analysis service.

use thiserror::Error;

/// The primary error type used across all Showroom adapters and core operations.
///
/// Only [`ShowroomError::Validation`] and [`ShowroomError::Internal`] ever reach
/// an HTTP caller. Upstream and persistence failures are absorbed by the
/// analysis orchestrator and degrade to a best-effort result.
#[derive(Debug, Error)]
pub enum ShowroomError {
    /// Malformed or incomplete analysis request (e.g. missing `visit_id`).
    #[error("validation error: {0}")]
    Validation(String),

    /// The language-model call failed, timed out, or returned unusable output.
    #[error("upstream error: {message}")]
    Upstream {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Storage or audit-log failure (database connection, query, serialization).
    #[error("persistence error: {source}")]
    Persistence {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration errors (invalid TOML, missing API key, bad header values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ShowroomError {
    /// Shorthand for an upstream error without an underlying source.
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true when the error was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_validation_is_a_client_error() {
        assert!(ShowroomError::Validation("visit_id is required".into()).is_client_error());
        assert!(!ShowroomError::upstream("boom").is_client_error());
        assert!(!ShowroomError::Internal("bug".into()).is_client_error());
        assert!(
            !ShowroomError::Persistence {
                source: Box::new(std::io::Error::other("disk full")),
            }
            .is_client_error()
        );
    }

    #[test]
    fn display_includes_message() {
        let err = ShowroomError::upstream("model returned 503");
        assert_eq!(err.to_string(), "upstream error: model returned 503");

        let err = ShowroomError::Timeout {
            duration: std::time::Duration::from_secs(30),
        };
        assert!(err.to_string().contains("30s"));
    }
}
