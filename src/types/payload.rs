use serde::{Deserialize, Serialize};

use crate::core::session::Session;

/// Site identifier the integrating app registers with
pub const DEFAULT_SITE: &str = "eduscrapeapp";

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Tools the remote service runs on its own side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuiltinTool {
    Time,
    Websearch,
}

/// Tool executed by the caller; the service only reports calls to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalTool {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request body for `POST /api/chat`
///
/// Optional fields are left off the wire when unset. `tools` is an `Option`
/// so that an explicitly empty list still serializes as `[]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatPayload {
    pub site: String,
    pub user_id: String,
    pub session_id: String,
    pub messages: Vec<ChatMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<BuiltinTool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_tools: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_tools: Vec<ExternalTool>,
}

impl ChatPayload {
    /// Payload for `session` on the default site with no messages yet
    pub fn new(session: &Session) -> Self {
        Self {
            site: DEFAULT_SITE.to_string(),
            user_id: session.user_id().to_string(),
            session_id: session.session_id().to_string(),
            messages: Vec::new(),
            tools: None,
            add_tools: None,
            additional_tools: Vec::new(),
        }
    }

    pub fn with_site(mut self, site: impl Into<String>) -> Self {
        self.site = site.into();
        self
    }

    pub fn with_system(mut self, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage::system(content));
        self
    }

    pub fn with_user(mut self, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage::user(content));
        self
    }

    pub fn with_tools(mut self, tools: Vec<BuiltinTool>) -> Self {
        self.tools = Some(tools);
        self
    }

    pub fn with_add_tools(mut self, add_tools: bool) -> Self {
        self.add_tools = Some(add_tools);
        self
    }

    pub fn with_additional_tool(mut self, tool: ExternalTool) -> Self {
        self.additional_tools.push(tool);
        self
    }

    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
