//! JSON snapshots of the ledger
//!
//! Addresses and owners are base58 strings; account data is base64.

use std::path::Path;

use anchor_lang::prelude::Pubkey;
use anchor_lang::solana_program::clock::Clock;
use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use social_ledger::{Ledger, StoredAccount};
use social_sdk::types::pubkey_string;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountEntry {
    #[serde(with = "pubkey_string")]
    pub address: Pubkey,
    pub lamports: u64,
    #[serde(with = "pubkey_string")]
    pub owner: Pubkey,
    /// Base64 account data
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub slot: u64,
    pub unix_timestamp: i64,
    pub accounts: Vec<AccountEntry>,
}

impl LedgerSnapshot {
    pub fn capture(ledger: &Ledger) -> Self {
        let accounts = ledger
            .accounts()
            .map(|(address, account)| AccountEntry {
                address: *address,
                lamports: account.lamports,
                owner: account.owner,
                data: STANDARD.encode(&account.data),
            })
            .collect();

        Self {
            slot: ledger.clock().slot,
            unix_timestamp: ledger.clock().unix_timestamp,
            accounts,
        }
    }

    pub fn restore(&self) -> Result<Ledger> {
        let accounts = self
            .accounts
            .iter()
            .map(|entry| {
                let data = STANDARD
                    .decode(&entry.data)
                    .with_context(|| format!("Invalid data for account {}", entry.address))?;
                Ok((
                    entry.address,
                    StoredAccount {
                        lamports: entry.lamports,
                        data,
                        owner: entry.owner,
                    },
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        let clock = Clock {
            slot: self.slot,
            unix_timestamp: self.unix_timestamp,
            ..Clock::default()
        };
        Ok(Ledger::from_accounts(accounts, clock))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to encode snapshot")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
        tracing::info!(path = %path.display(), accounts = self.accounts.len(), "snapshot saved");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot from {}", path.display()))?;
        let snapshot: Self = serde_json::from_str(&json)
            .with_context(|| format!("Invalid snapshot in {}", path.display()))?;
        tracing::info!(path = %path.display(), accounts = snapshot.accounts.len(), "snapshot loaded");
        Ok(snapshot)
    }
}
