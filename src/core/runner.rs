use std::io::Write;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::{
    session::Session,
    suite::{standard_suite, TestCase},
};
use crate::{
    config::ProbeConfig,
    error::Result,
    services::chat_client::ChatClient,
    types::{
        response::ChatResponse,
        result::{ProbeOutcome, SuiteReport, TestResult},
    },
};

/// Runs the probe suite against one endpoint, strictly one probe at a time
#[derive(Debug)]
pub struct ProbeRunner {
    config: ProbeConfig,
    client: ChatClient,
    session: Session,
}

impl ProbeRunner {
    /// Runner with a freshly generated session
    pub fn new(config: ProbeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            client: ChatClient::new(&config),
            config,
            session: Session::generate(),
        })
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn test_cases(&self) -> Vec<TestCase> {
        standard_suite(&self.session)
    }

    /// Send one case. Every failure ends up in the returned result.
    pub async fn probe(&self, case: &TestCase) -> TestResult {
        let started = Instant::now();
        debug!(test = %case.name, "sending probe");

        let outcome = match self.client.send(&case.payload).await {
            Ok((status, body)) => match ChatResponse::from_value(&body) {
                Ok(response) => ProbeOutcome::Success {
                    status,
                    body,
                    response,
                },
                Err(err) => ProbeOutcome::Failure(err),
            },
            Err(err) => ProbeOutcome::Failure(err),
        };

        let duration = started.elapsed();
        match &outcome {
            ProbeOutcome::Success { status, .. } => {
                info!(
                    test = %case.name,
                    status,
                    elapsed_ms = duration.as_millis() as u64,
                    "probe passed"
                );
            }
            ProbeOutcome::Failure(err) => {
                warn!(test = %case.name, code = err.error_code(), "probe failed: {}", err);
            }
        }

        TestResult::new(case.name.clone(), outcome, duration)
    }

    /// Run the standard suite, reporting to stdout
    pub async fn run(&self) -> Result<SuiteReport> {
        self.run_with_writer(&mut std::io::stdout()).await
    }

    pub async fn run_with_writer<W: Write>(&self, out: &mut W) -> Result<SuiteReport> {
        let cases = self.test_cases();
        self.run_cases(&cases, out).await
    }

    /// Run `cases` in order, writing each block as soon as it is known.
    ///
    /// Only a failure to write the report is returned as an error.
    pub async fn run_cases<W: Write>(
        &self,
        cases: &[TestCase],
        out: &mut W,
    ) -> Result<SuiteReport> {
        writeln!(out, "🔬 Alsom API Test Suite")?;
        writeln!(out, "API URL: {}", self.config.url())?;
        writeln!(out, "Time: {}", chrono::Local::now().to_rfc3339())?;

        let mut report = SuiteReport::new();

        for (index, case) in cases.iter().enumerate() {
            writeln!(out, "{}", case.render_header(index + 1)?)?;
            out.flush()?;

            let result = self.probe(case).await;
            writeln!(out, "{}", result.outcome.render())?;
            report.push(result);
        }

        writeln!(out, "{}", report.render_summary())?;
        out.flush()?;

        info!(
            passed = report.passed(),
            total = report.total(),
            "probe suite finished"
        );
        Ok(report)
    }
}
