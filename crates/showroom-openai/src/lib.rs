// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI provider adapter for the Showroom visit-analysis service.
//!
//! Implements [`CompletionProvider`] over the Chat Completions API. The
//! system prompt travels as a `system` message and JSON output is requested
//! through `response_format`.

pub mod client;
pub mod types;

use async_trait::async_trait;
use showroom_config::ShowroomConfig;
use showroom_core::error::ShowroomError;
use showroom_core::traits::{CompletionProvider, PluginAdapter};
use showroom_core::types::{
    AdapterType, CompletionRequest, CompletionResponse, HealthStatus, TokenUsage,
};
use tracing::info;

use crate::client::OpenAiClient;
use crate::types::{ChatCompletionRequest, ChatMessage, ResponseFormat};

/// Environment variable consulted when no key is configured.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// OpenAI provider implementing [`CompletionProvider`].
///
/// API key resolution order: config -> `OPENAI_API_KEY` env var -> error.
pub struct OpenAiProvider {
    client: OpenAiClient,
    default_model: String,
}

impl OpenAiProvider {
    /// Creates a provider from the `[openai]` configuration section.
    pub fn new(config: &ShowroomConfig) -> Result<Self, ShowroomError> {
        let api_key = resolve_api_key(&config.openai.api_key)?;
        let client = OpenAiClient::new(
            &api_key,
            config.openai.base_url.clone(),
            config.openai.timeout(),
        )?;

        info!(model = %config.openai.model, "OpenAI provider initialized");

        Ok(Self {
            client,
            default_model: config.openai.model.clone(),
        })
    }

    /// Creates a provider with an existing client.
    pub fn with_client(client: OpenAiClient, default_model: String) -> Self {
        Self {
            client,
            default_model,
        }
    }

    fn to_chat_request(&self, request: CompletionRequest) -> ChatCompletionRequest {
        let model = if request.model.is_empty() {
            self.default_model.clone()
        } else {
            request.model
        };
        let mut messages = Vec::with_capacity(2);
        if !request.system_prompt.is_empty() {
            messages.push(ChatMessage::system(request.system_prompt));
        }
        messages.push(ChatMessage::user(request.prompt));

        ChatCompletionRequest {
            model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: request.json_output.then(ResponseFormat::json_object),
        }
    }
}

#[async_trait]
impl PluginAdapter for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, ShowroomError> {
        // No probe call: it would spend tokens.
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ShowroomError> {
        let api_request = self.to_chat_request(request);
        let response = self.client.complete(&api_request).await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| ShowroomError::upstream("OpenAI response contained no content"))?;

        let usage = response
            .usage
            .map(|u| TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            id: response.id,
            content,
            model: response.model,
            usage,
        })
    }
}

/// Resolves the API key from config, then the environment.
fn resolve_api_key(config_key: &Option<String>) -> Result<String, ShowroomError> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(key.clone());
    }

    std::env::var(API_KEY_ENV)
        .ok()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| {
            ShowroomError::Config(
                "OpenAI API key not found. Set openai.api_key in config or OPENAI_API_KEY environment variable.".into(),
            )
        })
}
