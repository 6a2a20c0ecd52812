use crate::prompts::AnalysisMode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/analyze`.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(rename = "type", default)]
    pub kind: Option<Value>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl AnalyzeRequest {
    pub fn mode(&self) -> AnalysisMode {
        AnalysisMode::from_type(self.kind.as_ref().and_then(Value::as_str))
    }

    /// The submitted username, exactly as sent. Non-string values keep their
    /// JSON text; a missing or null value is empty.
    pub fn username(&self) -> String {
        match &self.data {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// Successful (or softly failed) analysis output.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyzeResponse {
    pub result: String,
}

impl AnalyzeResponse {
    pub fn upstream_error(message: &str) -> Self {
        Self {
            result: format!("> API ERROR: {}", message),
        }
    }
}
