//! Service configuration

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Lamports in one SOL
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Capacity of the submission queue
    pub queue_depth: usize,

    /// Lamports credited to each scenario wallet before replay
    pub airdrop_lamports: u64,

    /// Where the ledger is loaded from at startup and saved to at shutdown
    pub snapshot_path: Option<PathBuf>,

    /// Scenario to replay; the built-in demo runs when unset
    pub scenario_path: Option<PathBuf>,

    /// Pin ledger time instead of following the wall clock
    pub fixed_timestamp: Option<i64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            queue_depth: 64,
            airdrop_lamports: 10 * LAMPORTS_PER_SOL,
            snapshot_path: None,
            scenario_path: None,
            fixed_timestamp: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup, applying defaults for missing keys
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let queue_depth = match lookup("LEDGER_QUEUE_DEPTH") {
            Some(value) => value.parse().context("Invalid LEDGER_QUEUE_DEPTH")?,
            None => defaults.queue_depth,
        };
        anyhow::ensure!(queue_depth > 0, "LEDGER_QUEUE_DEPTH must be positive");

        Ok(Config {
            queue_depth,

            airdrop_lamports: match lookup("LEDGER_AIRDROP_LAMPORTS") {
                Some(value) => value.parse().context("Invalid LEDGER_AIRDROP_LAMPORTS")?,
                None => defaults.airdrop_lamports,
            },

            snapshot_path: lookup("LEDGER_SNAPSHOT_PATH").map(PathBuf::from),

            scenario_path: lookup("LEDGER_SCENARIO_PATH").map(PathBuf::from),

            fixed_timestamp: lookup("LEDGER_FIXED_TIMESTAMP")
                .map(|value| value.parse().context("Invalid LEDGER_FIXED_TIMESTAMP"))
                .transpose()?,
        })
    }
}
