use std::error::Error as StdError;

use serde_json::Value;
use thiserror::Error;

/// Error type for probe execution and setup
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("HTTP ERROR {status}")]
    Http {
        status: u16,
        /// Response body, cut to the first 500 characters
        body: String,
        /// Error body decoded as JSON, when it was JSON
        details: Option<Value>,
    },

    #[error("URL ERROR: {0}")]
    Transport(String),

    #[error("EXCEPTION: invalid JSON body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("EXCEPTION: {kind}: {message}")]
    Unexpected { kind: &'static str, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ProbeError>;

/// Coarse grouping of failures, as reported in the probe output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    HttpStatus,
    Transport,
    Unexpected,
    Setup,
}

impl ProbeError {
    pub(crate) fn unexpected(kind: &'static str, message: impl Into<String>) -> Self {
        ProbeError::Unexpected {
            kind,
            message: message.into(),
        }
    }

    /// Which part of the taxonomy this error belongs to
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProbeError::Http { .. } => ErrorCategory::HttpStatus,
            ProbeError::Transport(_) => ErrorCategory::Transport,
            ProbeError::Decode(_) | ProbeError::Unexpected { .. } => ErrorCategory::Unexpected,
            ProbeError::Config(_) | ProbeError::Io(_) => ErrorCategory::Setup,
        }
    }

    /// Setup errors abort the run; everything else stays inside one probe
    pub fn is_fatal(&self) -> bool {
        self.category() == ErrorCategory::Setup
    }

    /// Get the error code for structured output
    pub fn error_code(&self) -> &'static str {
        match self {
            ProbeError::Http { .. } => "HTTP_ERROR",
            ProbeError::Transport(_) => "TRANSPORT_ERROR",
            ProbeError::Decode(_) => "DECODE_ERROR",
            ProbeError::Unexpected { .. } => "UNEXPECTED_ERROR",
            ProbeError::Config(_) => "CONFIG_ERROR",
            ProbeError::Io(_) => "IO_ERROR",
        }
    }
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        let reason = error_chain(&err);

        if err.is_timeout() || err.is_connect() || err.is_request() || err.is_redirect() {
            ProbeError::Transport(reason)
        } else if err.is_builder() {
            ProbeError::unexpected("request", reason)
        } else if err.is_body() || err.is_decode() {
            ProbeError::unexpected("body", reason)
        } else {
            ProbeError::unexpected("http", reason)
        }
    }
}

/// Render an error with its sources, e.g. `error sending request: connection refused`
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();

    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }

    message
}
