use secrecy::Secret;
use service_core::config::{self as core_config, get_env, get_optional_env, is_production};
use service_core::error::AppError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    pub common: core_config::Config,
    pub provider: ProviderConfig,
}

/// Which hosted text-generation API backs the analysis endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    /// OpenAI-compatible chat completions (Groq).
    #[default]
    Groq,
    /// Google Gemini `generateContent`.
    Gemini,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "groq",
            ProviderKind::Gemini => "gemini",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "GROQ_API_KEY",
            ProviderKind::Gemini => "GOOGLE_API_KEY",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "llama3-8b-8192",
            ProviderKind::Gemini => "gemini-2.0-flash",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "https://api.groq.com/openai/v1",
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com/v1beta",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "groq" => Ok(ProviderKind::Groq),
            "gemini" => Ok(ProviderKind::Gemini),
            other => Err(AppError::ConfigError(anyhow::anyhow!(
                "unknown ANALYZE_PROVIDER '{}', expected 'groq' or 'gemini'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
}

impl ProviderConfig {
    /// Provider settings with the kind's default model and endpoint.
    pub fn new(kind: ProviderKind, api_key: impl Into<String>) -> Self {
        Self {
            kind,
            api_key: Secret::new(api_key.into()),
            model: kind.default_model().to_string(),
            base_url: kind.default_base_url().to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

impl AnalyzeConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = is_production();

        let kind: ProviderKind = get_env("ANALYZE_PROVIDER", Some("groq"), false)?.parse()?;

        // Outside production a missing key is tolerated; the provider's own
        // rejection then reaches callers as an inline API error.
        let api_key = match get_optional_env(kind.api_key_env()) {
            Some(key) => key,
            None if is_prod => {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    kind.api_key_env()
                )));
            }
            None => {
                tracing::warn!(
                    provider = %kind,
                    env = kind.api_key_env(),
                    "API key not set; upstream calls will be rejected"
                );
                String::new()
            }
        };

        let mut provider = ProviderConfig::new(kind, api_key);
        if let Some(model) = get_optional_env("ANALYZE_MODEL") {
            provider = provider.with_model(model);
        }
        if let Some(base_url) = get_optional_env("ANALYZE_PROVIDER_BASE_URL") {
            provider = provider.with_base_url(base_url);
        }

        Ok(AnalyzeConfig { common, provider })
    }
}
