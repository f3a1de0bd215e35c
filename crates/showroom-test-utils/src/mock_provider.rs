// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion provider for deterministic testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use showroom_core::traits::{CompletionProvider, PluginAdapter};
use showroom_core::types::{
    AdapterType, CompletionRequest, CompletionResponse, HealthStatus, TokenUsage,
};
use showroom_core::ShowroomError;

/// A well-formed model answer with the given probability and priority.
pub fn valid_analysis_json(purchase_probability: f64, priority_ranking: u8) -> String {
    serde_json::json!({
        "purchase_probability": purchase_probability,
        "sentiment_score": 0.4,
        "priority_ranking": priority_ranking,
        "confidence_score": 0.85,
        "recommended_actions": ["Call within 24 hours", "Arrange a test drive", "Prepare a financing quote"],
        "concerns": ["Comparing with a competitor"],
        "opportunities": ["Interested in extended warranty"],
        "next_contact_timing": "Within 24 hours",
        "reasoning": "Clear budget and short timeline",
        "cultural_considerations": "Involve the family in the next visit"
    })
    .to_string()
}

/// A completion provider that replays scripted replies.
///
/// Replies are popped from a FIFO queue; `Err` entries become upstream
/// failures. When the queue is empty a valid analysis is returned, unless
/// the provider was built with [`MockProvider::always_failing`].
pub struct MockProvider {
    replies: Mutex<VecDeque<Result<String, String>>>,
    always_fail: AtomicBool,
    calls: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            always_fail: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Pre-loads the reply queue.
    pub fn with_replies(replies: Vec<Result<String, String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Self::new()
        }
    }

    /// A provider whose every call fails.
    pub fn always_failing() -> Self {
        let provider = Self::new();
        provider.always_fail.store(true, Ordering::SeqCst);
        provider
    }

    /// Toggles permanent failure at runtime.
    pub fn set_failing(&self, failing: bool) {
        self.always_fail.store(failing, Ordering::SeqCst);
    }

    pub async fn push_reply(&self, reply: Result<String, String>) {
        self.replies.lock().await.push_back(reply);
    }

    /// Number of `complete` calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received so far, oldest first.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, ShowroomError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ShowroomError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let model = request.model.clone();
        self.requests.lock().await.push(request);

        if self.always_fail.load(Ordering::SeqCst) {
            return Err(ShowroomError::upstream("mock provider failure"));
        }

        let reply = self
            .replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(valid_analysis_json(0.8, 8)));

        match reply {
            Ok(content) => Ok(CompletionResponse {
                id: format!("mock-resp-{}", uuid::Uuid::new_v4()),
                content,
                model,
                usage: TokenUsage {
                    input_tokens: 10,
                    output_tokens: 20,
                },
            }),
            Err(message) => Err(ShowroomError::upstream(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "mock-model".into(),
            system_prompt: String::new(),
            prompt: "score".into(),
            temperature: 0.3,
            max_tokens: 100,
            json_output: true,
        }
    }

    #[tokio::test]
    async fn replays_scripted_replies_then_default() {
        let provider = MockProvider::with_replies(vec![
            Ok("first".into()),
            Err("boom".into()),
        ]);
        assert_eq!(provider.complete(request()).await.unwrap().content, "first");
        assert!(provider.complete(request()).await.is_err());
        let default = provider.complete(request()).await.unwrap();
        assert!(default.content.contains("purchase_probability"));
        assert_eq!(provider.call_count(), 3);
        assert_eq!(provider.requests().await.len(), 3);
    }

    #[tokio::test]
    async fn always_failing_fails() {
        let provider = MockProvider::always_failing();
        assert!(provider.complete(request()).await.is_err());
        provider.set_failing(false);
        assert!(provider.complete(request()).await.is_ok());
    }
}
