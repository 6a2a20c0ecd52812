//! Mock provider implementation for testing.

use super::{ProviderError, TextProvider};
use crate::prompts::Prompt;
use async_trait::async_trait;
use std::sync::Mutex;

enum MockOutcome {
    Complete(String),
    Upstream(String),
    Network(String),
}

/// Mock text provider that returns a canned outcome and records its prompts.
pub struct MockTextProvider {
    outcome: MockOutcome,
    prompts: Mutex<Vec<Prompt>>,
}

impl MockTextProvider {
    fn with_outcome(outcome: MockOutcome) -> Self {
        Self {
            outcome,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Always answers with `text`.
    pub fn completing(text: impl Into<String>) -> Self {
        Self::with_outcome(MockOutcome::Complete(text.into()))
    }

    /// Always reports a provider-side error carrying `message`.
    pub fn upstream_error(message: impl Into<String>) -> Self {
        Self::with_outcome(MockOutcome::Upstream(message.into()))
    }

    /// Always fails as if the connection dropped.
    pub fn network_error(message: impl Into<String>) -> Self {
        Self::with_outcome(MockOutcome::Network(message.into()))
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(&self, prompt: &Prompt) -> Result<String, ProviderError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.clone());
        }

        match &self.outcome {
            MockOutcome::Complete(text) => Ok(text.clone()),
            MockOutcome::Upstream(message) => Err(ProviderError::Upstream(message.clone())),
            MockOutcome::Network(message) => Err(ProviderError::Network(message.clone())),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
