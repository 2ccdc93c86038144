use crate::{ProbeConfig, ProbeRunner};
use clap::Command;
use tracing::{error, info};

/// CLI entry point for the alsom-probe tool
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment overrides from a .env file, if any
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    Command::new("alsom-probe")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Probe which chat payload shapes the Alsom API accepts")
        .long_about(
            "Sends a fixed suite of twelve chat payloads to the Alsom API and reports \
             which ones succeed. Set ALSOM_API_URL or ALSOM_TIMEOUT_SECS to override \
             the endpoint or the per-request timeout.",
        )
        .get_matches();

    let config = ProbeConfig::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;
    info!("Probing {}", config.url());

    let runner = ProbeRunner::new(config)?;
    let report = runner.run().await?;

    // Probe failures are part of the report, not of the exit status
    info!(
        "Probe run completed: {}/{} passed",
        report.passed(),
        report.total()
    );

    Ok(())
}
