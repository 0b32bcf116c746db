//! Error types for the social SDK

use anchor_lang::prelude::Pubkey;
use social_ledger::{ProgramFailure, SocialError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Program rejected operation: {0}")]
    Program(#[from] ProgramFailure),

    #[error("No profile registered for {0}")]
    ProfileNotFound(Pubkey),

    #[error("Account {address} is owned by {owner}, not the social ledger")]
    ForeignAccount { address: Pubkey, owner: Pubkey },

    #[error("Failed to decode account {address}: {reason}")]
    Decode { address: Pubkey, reason: String },

    #[error("Failed to build request: {0}")]
    Request(String),
}

impl ClientError {
    /// The program failure behind this error, if the ledger rejected an operation
    pub fn program_failure(&self) -> Option<&ProgramFailure> {
        match self {
            Self::Program(failure) => Some(failure),
            _ => None,
        }
    }

    /// Whether the ledger rejected an operation with `kind`
    pub fn is(&self, kind: SocialError) -> bool {
        self.program_failure().is_some_and(|failure| failure.is(kind))
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
