pub mod payload;
pub mod response;
pub mod result;

pub use payload::{BuiltinTool, ChatMessage, ChatPayload, ExternalTool, Role, DEFAULT_SITE};
pub use response::{is_truthy, truncate_chars, ChatResponse, TokenUsage, ToolCallRecord};
pub use result::{ProbeOutcome, SuiteReport, TestResult};
