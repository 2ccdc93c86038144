pub mod runner;
pub mod session;
pub mod suite;

pub use runner::ProbeRunner;
pub use session::Session;
pub use suite::{standard_suite, TestCase, SUITE_SIZE};
