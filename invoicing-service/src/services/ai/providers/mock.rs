//! Mock chat provider for testing.

use super::{ChatProvider, ChatRequest, ProviderError};
use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::Mutex;

/// Mock provider that serves scripted responses in order, falling back
/// to a canned payload once the script runs out.
pub struct MockChatProvider {
    enabled: bool,
    responses: Mutex<VecDeque<String>>,
}

impl MockChatProvider {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            responses: Mutex::new(VecDeque::new()),
        }
    }

    /// Queue scripted responses.
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enabled: true,
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
        }
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    async fn complete(&self, request: &ChatRequest) -> Result<String, ProviderError> {
        if !self.enabled {
            return Err(ProviderError::NotConfigured(
                "Mock chat provider not enabled".to_string(),
            ));
        }

        if let Some(scripted) = self.responses.lock().await.pop_front() {
            return Ok(scripted);
        }

        if request.json_only {
            Ok(r#"{"items": []}"#.to_string())
        } else {
            Ok(r#"{"message": "This is a mock payment reminder."}"#.to_string())
        }
    }
}
