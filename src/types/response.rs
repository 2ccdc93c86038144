use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ProbeError, Result};

/// Characters of `reply` shown in a success report
pub const REPLY_PREVIEW_CHARS: usize = 300;

/// Fields of a `POST /api/chat` response the probe reports on
///
/// Every field is optional because the point of probing is to see what the
/// service actually sends back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub reply: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub debug: Option<Value>,
    #[serde(default)]
    pub usage: Option<Value>,
    #[serde(default)]
    pub tool_calls: Option<Value>,
    #[serde(default)]
    pub external_tool_calls: Option<Value>,
}

/// Token usage, when `usage` has the OpenAI-style shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// One entry of `tool_calls` / `external_tool_calls`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallRecord {
    pub tool: String,
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl ChatResponse {
    /// Read the known fields out of a decoded body, which must be an object
    pub fn from_value(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(ProbeError::unexpected(
                "shape",
                format!("response body is not a JSON object: {}", json_kind(value)),
            ));
        }

        // A present reply must be previewable text; lists are shown as JSON
        if let Some(reply) = value.get("reply") {
            if !matches!(reply, Value::String(_) | Value::Array(_)) {
                return Err(ProbeError::unexpected(
                    "reply",
                    format!("`reply` is not a string: {}", json_kind(reply)),
                ));
            }
        }

        Ok(serde_json::from_value(value.clone())?)
    }

    /// `reply` cut to [`REPLY_PREVIEW_CHARS`], `N/A` when missing
    pub fn reply_preview(&self) -> String {
        let reply = match &self.reply {
            None => return "N/A".to_string(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        };

        if reply.chars().count() > REPLY_PREVIEW_CHARS {
            format!("{}...", truncate_chars(&reply, REPLY_PREVIEW_CHARS))
        } else {
            reply
        }
    }

    /// Application-level error carried in a successful response
    pub fn app_error(&self) -> Option<&Value> {
        self.error.as_ref().filter(|value| is_truthy(value))
    }

    pub fn token_usage(&self) -> Option<TokenUsage> {
        self.usage
            .as_ref()
            .and_then(|usage| serde_json::from_value(usage.clone()).ok())
    }

    pub fn tool_calls(&self) -> Vec<ToolCallRecord> {
        parse_tool_calls(self.tool_calls.as_ref())
    }

    pub fn external_tool_calls(&self) -> Vec<ToolCallRecord> {
        parse_tool_calls(self.external_tool_calls.as_ref())
    }
}

fn parse_tool_calls(value: Option<&Value>) -> Vec<ToolCallRecord> {
    value
        .and_then(Value::as_array)
        .map(|calls| {
            calls
                .iter()
                .filter_map(|call| serde_json::from_value(call.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// `null`, `false`, `0`, `""`, `[]` and `{}` count as empty
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(true, |n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// Prefix of `text` holding at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
