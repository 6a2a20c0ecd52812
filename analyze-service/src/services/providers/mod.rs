//! Text generation provider abstractions and implementations.
//!
//! Every hosted API sits behind [`TextProvider`], so the analysis handler never
//! deals with a provider's request or response shape.

pub mod gemini;
pub mod groq;
pub mod mock;

use crate::config::{ProviderConfig, ProviderKind};
use crate::prompts::Prompt;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Sampling temperature sent with every completion request.
pub const TEMPERATURE: f32 = 0.7;

/// Request timeout applied by each provider's HTTP client.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The provider answered with its own error object (bad key, quota, ...).
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// Trait for hosted text-generation backends.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate text for the given prompt.
    async fn generate(&self, prompt: &Prompt) -> Result<String, ProviderError>;

    /// Short provider identifier for logs and health output.
    fn name(&self) -> &'static str;
}

/// Turn the `error` field of a provider response into an upstream error.
///
/// Falsy values (`null`, `false`, `0`, `""`) mean there is no error. A bare
/// string is the message itself; an object contributes its `message`,
/// rendered as JSON text when it is not a string.
pub(crate) fn upstream_error(error: &Value) -> Option<ProviderError> {
    let message = match error {
        Value::Null | Value::Bool(false) => return None,
        Value::Number(n) if n.as_f64() == Some(0.0) => return None,
        Value::String(s) if s.is_empty() => return None,
        Value::String(s) => Some(s.clone()),
        Value::Object(fields) => match fields.get("message") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        },
        _ => None,
    };

    Some(ProviderError::Upstream(
        message.unwrap_or_else(|| "unknown error".to_string()),
    ))
}

pub(crate) fn http_client() -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| ProviderError::NotConfigured(format!("Failed to create HTTP client: {}", e)))
}

/// Read a response body and decode it as JSON, whatever the HTTP status.
pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ProviderError> {
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| ProviderError::Network(e.without_url().to_string()))?;

    serde_json::from_slice(&body).map_err(|e| {
        ProviderError::MalformedResponse(format!(
            "status {}: {} ({})",
            status,
            e,
            String::from_utf8_lossy(&body[..body.len().min(256)])
        ))
    })
}

/// Construct the provider selected by configuration.
pub fn build_provider(config: &ProviderConfig) -> Result<Arc<dyn TextProvider>, ProviderError> {
    let provider: Arc<dyn TextProvider> = match config.kind {
        ProviderKind::Groq => Arc::new(groq::GroqProvider::new(config.clone())?),
        ProviderKind::Gemini => Arc::new(gemini::GeminiProvider::new(config.clone())?),
    };
    Ok(provider)
}
