//! alsom-probe: find out which chat payload shapes the Alsom API accepts
//!
//! The crate sends a fixed, ordered suite of payload variants to the chat
//! endpoint, one request at a time, and reports which ones come back as
//! JSON. A failing probe never stops the ones after it.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use alsom_probe::{ProbeConfig, ProbeRunner};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let runner = ProbeRunner::new(ProbeConfig::from_env()?)?;
//!     let report = runner.run().await?;
//!     println!("{} of {} payloads accepted", report.passed(), report.total());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub(crate) mod services;
pub mod types;

pub use config::ProbeConfig;
pub use core::{standard_suite, ProbeRunner, Session, TestCase, SUITE_SIZE};
pub use error::{ErrorCategory, ProbeError, Result};
pub use types::{
    BuiltinTool, ChatMessage, ChatPayload, ChatResponse, ProbeOutcome, Role, SuiteReport,
    TestResult,
};

#[cfg(feature = "cli")]
pub mod cli;
