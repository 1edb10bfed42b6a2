use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DetectionType {
    #[default]
    Input,
    Output,
}

impl DetectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionType::Input => "input",
            DetectionType::Output => "output",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            DetectionType::Input => DetectionType::Output,
            DetectionType::Output => DetectionType::Input,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Suggestion {
    Pass,
    Rewrite,
    Block,
    Error,
    #[serde(other)]
    Other,
}

impl Suggestion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Suggestion::Pass => "pass",
            Suggestion::Rewrite => "rewrite",
            Suggestion::Block => "block",
            Suggestion::Error => "error",
            Suggestion::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InspectRequest {
    #[serde(default = "default_asset_id")]
    pub asset_id: String,
    pub text: String,
    pub detection_type: DetectionType,
}

impl InspectRequest {
    pub fn new(detection_type: DetectionType, asset_id: impl Into<String>, text: impl Into<String>) -> Self {
        let asset_id = asset_id.into();
        Self {
            asset_id: if asset_id.is_empty() {
                default_asset_id()
            } else {
                asset_id
            },
            text: text.into(),
            detection_type,
        }
    }
}

fn default_asset_id() -> String {
    "default".to_string()
}

/// Verdict returned for one inspected text. Servers may attach extra fields;
/// callers that need them verbatim keep the raw JSON alongside.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InspectDecision {
    #[serde(rename = "errCode", default = "default_err_code")]
    pub err_code: i64,
    #[serde(rename = "errMsg", default)]
    pub err_msg: String,
    pub suggestion: Suggestion,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub answer: Option<String>,
}

impl InspectDecision {
    /// Substituted answer, with the service's empty-string placeholder
    /// treated as absent.
    pub fn answer_text(&self) -> Option<&str> {
        self.answer.as_deref().filter(|answer| !answer.is_empty())
    }
}

fn default_err_code() -> i64 {
    200
}

const fn default_temperature() -> f64 {
    0.1
}

const fn default_max_tokens() -> u32 {
    500
}

const fn default_timeout() -> u64 {
    30
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

/// Model-provider settings persisted by the guardrail service. Fields the
/// service omits fall back to the documented defaults on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            api_key: String::new(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
    pub result: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}
