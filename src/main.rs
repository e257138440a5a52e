//! Switch Relay - Main Entry Point
//!
//! Reads device events as JSON lines on stdin and relays commands to the
//! light control service.

use anyhow::Context;
use switch_relay::services::{CommandRelay, HttpTransport, block_on, run};
use switch_relay::utils::config_store::load_relay_config;
use switch_relay::utils::logging::init_logging;

fn main() -> anyhow::Result<()> {
    let config = load_relay_config().context("failed to load relay config")?;

    // Guard flushes the log file on exit
    let _guard = init_logging(&config.log).context("failed to initialize logging")?;

    tracing::info!("Starting Switch Relay -> {}", config.endpoint.url());

    let transport = HttpTransport::new(config.timeout())?;
    // Outcomes are already logged; with the receiver dropped, sends are no-ops
    let (tx, _) = crossbeam_channel::unbounded();
    let relay = CommandRelay::new(&config.endpoint, transport, tx);

    let summary = block_on(async move {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        run(stdin, relay).await
    })??;

    tracing::info!(
        "Event stream closed: {} event(s), {} request(s), {} skipped",
        summary.events,
        summary.requests,
        summary.skipped
    );

    Ok(())
}
