// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion provider trait for language-model integrations.

use async_trait::async_trait;

use crate::error::ShowroomError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{CompletionRequest, CompletionResponse};

/// Adapter for a language-model completion endpoint.
///
/// Implementations return [`ShowroomError::Upstream`] for transport failures
/// and non-2xx responses. They do not retry.
#[async_trait]
pub trait CompletionProvider: PluginAdapter {
    /// Sends a completion request and returns the full response.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ShowroomError>;
}
