use serde_json::Value;
use std::time::Duration;

use super::response::{is_truthy, ChatResponse};
use crate::error::ProbeError;

/// Width of the `=` rules framing each report section
pub const RULE_WIDTH: usize = 60;

pub const SUCCESS_CONCLUSION: &str =
    "🎉 Working configurations found! Use the successful payload format in the app.";
pub const FAILURE_CONCLUSION: &str =
    "⚠️  No working configurations found. API may be down or misconfigured.";

/// What a single probe came back with
#[derive(Debug)]
pub enum ProbeOutcome {
    Success {
        status: u16,
        body: Value,
        response: ChatResponse,
    },
    Failure(ProbeError),
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success { .. })
    }

    /// Report block printed right after the call returns
    pub fn render(&self) -> String {
        let mut lines = vec![String::new()];

        match self {
            ProbeOutcome::Success {
                status, response, ..
            } => {
                lines.push(format!("✅ SUCCESS (HTTP {})", status));
                lines.push(format!("Reply: {}", response.reply_preview()));

                if let Some(error) = response.app_error() {
                    lines.push(format!("Error in response: {}", display_value(error)));
                }
                if let Some(message) = response.message.as_ref().filter(|v| is_truthy(v)) {
                    lines.push(format!("Message: {}", display_value(message)));
                }
                if let Some(debug) = response.debug.as_ref().filter(|v| is_truthy(v)) {
                    lines.push(format!("Debug: {}", pretty(debug)));
                }
                if let Some(usage) = response.usage.as_ref().filter(|v| is_truthy(v)) {
                    lines.push(format!("Usage: {}", pretty(usage)));
                }
                if let Some(tokens) = response.token_usage() {
                    lines.push(format!(
                        "Tokens: {} prompt + {} completion = {} total",
                        tokens.prompt_tokens, tokens.completion_tokens, tokens.total_tokens
                    ));
                }

                let tool_calls = response.tool_calls();
                if !tool_calls.is_empty() {
                    let names: Vec<&str> = tool_calls.iter().map(|c| c.tool.as_str()).collect();
                    lines.push(format!(
                        "Tool calls: {} ({})",
                        tool_calls.len(),
                        names.join(", ")
                    ));
                }
                let external = response.external_tool_calls();
                if !external.is_empty() {
                    lines.push(format!("External tool calls: {}", external.len()));
                }
            }
            ProbeOutcome::Failure(error) => {
                lines.push(format!("❌ {}", error));

                if let ProbeError::Http { body, details, .. } = error {
                    lines.push(format!("Response: {}", body));
                    if let Some(details) = details {
                        lines.push(format!("Error details: {}", pretty(details)));
                    }
                }
            }
        }

        lines.join("\n")
    }
}

/// Record of one finished probe
#[derive(Debug)]
pub struct TestResult {
    pub name: String,
    pub outcome: ProbeOutcome,
    pub duration: Duration,
}

impl TestResult {
    pub fn new(name: impl Into<String>, outcome: ProbeOutcome, duration: Duration) -> Self {
        Self {
            name: name.into(),
            outcome,
            duration,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.outcome.is_success()
    }

    /// Decoded body of a successful probe
    pub fn response_body(&self) -> Option<&Value> {
        match &self.outcome {
            ProbeOutcome::Success { body, .. } => Some(body),
            ProbeOutcome::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ProbeError> {
        match &self.outcome {
            ProbeOutcome::Success { .. } => None,
            ProbeOutcome::Failure(error) => Some(error),
        }
    }

    /// `✅ PASS - name (0.42s)` / `❌ FAIL - name (0.42s)`
    pub fn summary_line(&self) -> String {
        let status = if self.succeeded() {
            "✅ PASS"
        } else {
            "❌ FAIL"
        };
        format!(
            "{} - {} ({:.2}s)",
            status,
            self.name,
            self.duration.as_secs_f64()
        )
    }
}

/// All results of one run, in execution order
#[derive(Debug, Default)]
pub struct SuiteReport {
    results: Vec<TestResult>,
}

impl SuiteReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: TestResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.succeeded()).count()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn any_passed(&self) -> bool {
        self.passed() > 0
    }

    pub fn conclusion(&self) -> &'static str {
        if self.any_passed() {
            SUCCESS_CONCLUSION
        } else {
            FAILURE_CONCLUSION
        }
    }

    /// Summary table, totals and conclusion
    pub fn render_summary(&self) -> String {
        let mut lines = vec![String::new(), rule(), "SUMMARY".to_string(), rule()];

        for result in &self.results {
            lines.push(result.summary_line());
        }

        lines.push(String::new());
        lines.push(format!(
            "Total: {}/{} tests passed",
            self.passed(),
            self.total()
        ));
        lines.push(String::new());
        lines.push(self.conclusion().to_string());

        lines.join("\n")
    }
}

pub(crate) fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub(crate) fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
