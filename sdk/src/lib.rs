//! Social SDK - client interface for the social ledger
//!
//! This SDK provides thin wrappers for:
//! - Address derivation matching the program's seeds
//! - Operation request builders
//! - Typed reads with an explicit "does not exist" result
//! - Display views for profiles and posts

pub mod addresses;
pub mod client;
pub mod error;
pub mod instructions;
pub mod types;

// Re-export key types
pub use client::{decode_account, LedgerBackend, SocialClient};
pub use error::{ClientError, Result};
pub use types::*;

// Prelude for applications built on the SDK
pub mod prelude {
    pub use anchor_lang::prelude::Pubkey;
    pub use social_ledger::{Ledger, Like, Post, SocialError, TransactionReceipt, UserProfile};

    pub use crate::{ClientError, LedgerBackend, PostView, ProfileView, SocialClient};
}
