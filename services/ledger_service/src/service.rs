//! Single-writer ledger service
//!
//! One task owns the ledger. Any number of callers hold a cloneable
//! [`LedgerHandle`] and send commands over a bounded queue; each command is
//! answered on its own oneshot channel. Commands run strictly one after another,
//! so a composite update is never interleaved with another operation.

use anchor_lang::prelude::Pubkey;
use anyhow::{anyhow, Context, Result};
use social_ledger::{
    Ledger, LedgerRecord, OperationRequest, ProgramFailure, StoredAccount, TransactionReceipt,
};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::snapshot::LedgerSnapshot;

/// Where ledger time comes from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeSource {
    Fixed(i64),
    WallClock,
}

impl TimeSource {
    pub fn from_config(config: &Config) -> Self {
        config.fixed_timestamp.map_or(Self::WallClock, Self::Fixed)
    }

    pub fn now(self) -> i64 {
        match self {
            Self::Fixed(timestamp) => timestamp,
            Self::WallClock => chrono::Utc::now().timestamp(),
        }
    }
}

enum Command {
    Submit {
        request: OperationRequest,
        reply: oneshot::Sender<std::result::Result<TransactionReceipt, ProgramFailure>>,
    },
    Read {
        address: Pubkey,
        reply: oneshot::Sender<Option<StoredAccount>>,
    },
    Airdrop {
        address: Pubkey,
        lamports: u64,
        reply: oneshot::Sender<u64>,
    },
    Snapshot {
        reply: oneshot::Sender<LedgerSnapshot>,
    },
}

/// The task that owns the ledger
pub struct LedgerService {
    ledger: Ledger,
    time: TimeSource,
    receiver: mpsc::Receiver<Command>,
}

impl LedgerService {
    /// Start the service; the join handle yields the final ledger once every
    /// handle has been dropped
    pub fn spawn(ledger: Ledger, config: &Config) -> (LedgerHandle, JoinHandle<Ledger>) {
        let (sender, receiver) = mpsc::channel(config.queue_depth);
        let service = Self {
            ledger,
            time: TimeSource::from_config(config),
            receiver,
        };
        (LedgerHandle { sender }, tokio::spawn(service.run()))
    }

    async fn run(mut self) -> Ledger {
        info!("Ledger service started");

        while let Some(command) = self.receiver.recv().await {
            self.handle(command);
        }

        info!(slot = self.ledger.clock().slot, "Ledger service stopped");
        self.ledger
    }

    fn handle(&mut self, command: Command) {
        // A caller that gave up waiting has dropped its receiver; nothing to do
        match command {
            Command::Submit { request, reply } => {
                self.ledger.warp_to_timestamp(self.time.now());
                let result = self.ledger.process(&request);
                match &result {
                    Ok(receipt) => {
                        debug!(instruction = %receipt.instruction, slot = receipt.slot, "committed");
                    }
                    Err(failure) => warn!(error = %failure, "rejected"),
                }
                let _ = reply.send(result);
            }
            Command::Read { address, reply } => {
                let _ = reply.send(self.ledger.account(&address).cloned());
            }
            Command::Airdrop {
                address,
                lamports,
                reply,
            } => {
                self.ledger.airdrop(&address, lamports);
                debug!(%address, lamports, "airdrop");
                let _ = reply.send(self.ledger.balance(&address));
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(LedgerSnapshot::capture(&self.ledger));
            }
        }
    }
}

/// Cloneable access to a running [`LedgerService`]
#[derive(Clone)]
pub struct LedgerHandle {
    sender: mpsc::Sender<Command>,
}

impl LedgerHandle {
    async fn call<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(command(reply))
            .await
            .map_err(|_| anyhow!("Ledger service is not running"))?;
        response.await.context("Ledger service dropped the request")
    }

    /// Submit one operation; a program rejection is returned as a
    /// [`ProgramFailure`] error
    pub async fn submit(&self, request: OperationRequest) -> Result<TransactionReceipt> {
        let result = self
            .call(|reply| Command::Submit { request, reply })
            .await?;
        Ok(result?)
    }

    pub async fn read(&self, address: Pubkey) -> Result<Option<StoredAccount>> {
        self.call(|reply| Command::Read { address, reply }).await
    }

    /// Read and decode a record; `None` if nothing is stored at `address`
    pub async fn fetch<R: LedgerRecord>(&self, address: Pubkey) -> Result<Option<R>> {
        let account = self.read(address).await?;
        Ok(social_sdk::decode_account(&address, account)?)
    }

    /// Credit `lamports` to `address`, returning the new balance
    pub async fn airdrop(&self, address: Pubkey, lamports: u64) -> Result<u64> {
        self.call(|reply| Command::Airdrop {
            address,
            lamports,
            reply,
        })
        .await
    }

    pub async fn balance(&self, address: Pubkey) -> Result<u64> {
        Ok(self.read(address).await?.map_or(0, |account| account.lamports))
    }

    pub async fn snapshot(&self) -> Result<LedgerSnapshot> {
        self.call(|reply| Command::Snapshot { reply }).await
    }
}
