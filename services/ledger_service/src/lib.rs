//! Social Ledger Service
//!
//! Runs the social ledger behind a single-writer actor:
//! - Accepts operations from any number of concurrent callers
//! - Executes them one at a time against the in-memory ledger
//! - Persists the ledger as a JSON snapshot between runs
//! - Replays scripted scenarios against named wallets

pub mod config;
pub mod scenario;
pub mod service;
pub mod snapshot;

pub use config::Config;
pub use scenario::{replay, wallet_address, Action, Scenario, Step, StepOutcome};
pub use service::{LedgerHandle, LedgerService, TimeSource};
pub use snapshot::{AccountEntry, LedgerSnapshot};
