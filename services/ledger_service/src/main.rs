//! Social Ledger Service
//!
//! Loads the ledger (from a snapshot when one exists), replays a scenario
//! through the single-writer service and saves the resulting ledger.

use anyhow::{Context, Result};
use social_ledger::Ledger;
use social_ledger_service::{replay, Config, LedgerService, LedgerSnapshot, Scenario};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Social Ledger Service");

    // Load configuration
    let config = Config::from_env()?;

    let ledger = match &config.snapshot_path {
        Some(path) if path.exists() => LedgerSnapshot::load(path)?.restore()?,
        _ => Ledger::new(),
    };

    let scenario = match &config.scenario_path {
        Some(path) => Scenario::load(path)?,
        None => {
            info!("No scenario configured, running the demo");
            Scenario::demo()
        }
    };

    let (handle, service) = LedgerService::spawn(ledger, &config);

    // Replay until done or interrupted
    let outcomes = tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            warn!("Received shutdown signal, replay interrupted");
            None
        }
        res = replay(&handle, &scenario, config.airdrop_lamports) => Some(res?),
    };

    drop(handle);
    let ledger = service.await.context("Ledger service task failed")?;

    if let Some(path) = &config.snapshot_path {
        LedgerSnapshot::capture(&ledger).save(path)?;
    }

    if let Some(outcomes) = outcomes {
        let diverged: Vec<_> = outcomes.iter().filter(|o| !o.as_expected()).collect();
        info!(
            steps = outcomes.len(),
            diverged = diverged.len(),
            "Scenario replay finished"
        );
        if !diverged.is_empty() {
            for outcome in &diverged {
                error!(step = outcome.step, op = outcome.op, failure = ?outcome.failure, "unexpected outcome");
            }
            anyhow::bail!("{} scenario step(s) did not behave as expected", diverged.len());
        }
    }

    info!("Shutting down Social Ledger Service");
    Ok(())
}
