use serde_json::Value;

use super::session::Session;
use crate::{
    error::Result,
    types::{
        payload::{BuiltinTool, ChatPayload},
        result::{pretty, rule},
    },
};

pub const SUITE_SIZE: usize = 12;

const GENERIC_SYSTEM_PROMPT: &str = "You are a helpful assistant.";
const APP_SYSTEM_PROMPT: &str =
    "You are an AI assistant for EduScrapeApp, an educational platform.";

/// A named payload variant
///
/// `name` is what the summary lists; `title` heads the per-test block and
/// only differs where a longer description reads better.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    pub name: String,
    pub title: String,
    pub payload: ChatPayload,
}

impl TestCase {
    pub fn new(name: impl Into<String>, payload: ChatPayload) -> Self {
        let name = name.into();
        Self {
            title: name.clone(),
            name,
            payload,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn payload_value(&self) -> Result<Value> {
        Ok(self.payload.to_value()?)
    }

    /// Block printed before the request goes out; `position` is 1-based
    pub fn render_header(&self, position: usize) -> Result<String> {
        let lines = [
            String::new(),
            rule(),
            format!("TEST: {}. {}", position, self.title),
            rule(),
            format!("Payload: {}", pretty(&self.payload_value()?)),
        ];
        Ok(lines.join("\n"))
    }
}

/// The twelve payload shapes, in run order
pub fn standard_suite(session: &Session) -> Vec<TestCase> {
    let minimal = || ChatPayload::new(session).with_user("hi");

    vec![
        TestCase::new("Minimal required fields", minimal()),
        TestCase::new(
            "With system message",
            ChatPayload::new(session)
                .with_system(GENERIC_SYSTEM_PROMPT)
                .with_user("hi"),
        ),
        TestCase::new(
            "With time tool",
            minimal().with_tools(vec![BuiltinTool::Time]),
        )
        .with_title("With time tool enabled"),
        TestCase::new(
            "With websearch tool",
            minimal().with_tools(vec![BuiltinTool::Websearch]),
        ),
        TestCase::new(
            "With both tools",
            minimal().with_tools(vec![BuiltinTool::Time, BuiltinTool::Websearch]),
        ),
        TestCase::new("With add_tools=true", minimal().with_add_tools(true)),
        TestCase::new("With add_tools=false", minimal().with_add_tools(false)),
        TestCase::new("Empty tools array", minimal().with_tools(Vec::new())),
        TestCase::new(
            "Full EduScrapeApp config",
            ChatPayload::new(session)
                .with_system(APP_SYSTEM_PROMPT)
                .with_user("hi")
                .with_tools(vec![BuiltinTool::Time, BuiltinTool::Websearch])
                .with_add_tools(false),
        ),
        TestCase::new(
            "Simple question",
            ChatPayload::new(session).with_user("What is 2 + 2?"),
        ),
        TestCase::new(
            "No optional fields",
            ChatPayload::new(session).with_user("Hello, how are you?"),
        ),
        TestCase::new("Different site name", minimal().with_site("test")),
    ]
}
