#![allow(deprecated, unexpected_cfgs)]
//! Social posting ledger.
//!
//! Users register a profile, publish posts and like each other's posts. Every
//! record lives at an address derived from fixed seeds, so any caller can
//! recompute where a profile, post or like is stored without a lookup table.
//!
//! The crate is organised leaves first:
//! - [`pda`]: deterministic address derivation
//! - [`state`]: record schema and fixed-capacity codec
//! - [`lifecycle`]: create/close of records with rent reservation
//! - [`instructions`]: the six state-changing operations
//! - [`processor`]: request decoding and staged, all-or-nothing commit
//! - [`store`]: the account store abstraction and the in-memory ledger
use anchor_lang::prelude::*;

// ================================
// Module Declarations
// ================================

pub mod errors;
pub mod instructions;
pub mod lifecycle;
pub mod pda;
pub mod processor;
pub mod state;
pub mod store;
pub mod validation;

// ================================
// Public API Exports
// ================================

pub use errors::{custom_error_code, remap_error, ProgramFailure, SocialError};
pub use instructions::{
    CreatePost, DeletePost, Initialize, InstructionAccounts, InstructionContext, LikePost,
    RegisterUser, SocialInstruction, UnlikePost,
};
pub use processor::{process_instruction, OperationRequest, TransactionReceipt};
pub use state::{LedgerRecord, Like, Post, UserProfile};
pub use store::{AccountStore, ChangeSet, Ledger, StagedAccounts, StoredAccount};

// ================================
// Program ID Declaration
// ================================

declare_id!("eXJ3835fj4ggx2ykxtzXsACc8zpSso63buUqTAZpB6p");

pub const PROGRAM_ID: Pubkey = ID;

// ================================
// Seeds
// ================================

/// PDA seed for user profiles: `[USER_PROFILE_SEED, authority]`
pub const USER_PROFILE_SEED: &[u8] = b"user-profile";

/// PDA seed for posts: `[POST_SEED, authority, index_le_bytes]`
pub const POST_SEED: &[u8] = b"post";

/// PDA seed for likes: `[LIKE_SEED, post, liker]`
pub const LIKE_SEED: &[u8] = b"like";

// ================================
// Capacity Constants
// ================================
// Storage for every record is reserved once at its maximum size and never
// resized. Changing any of these changes the on-ledger layout.

/// Maximum username length in bytes
pub const MAX_USERNAME_LEN: usize = 32;

/// Maximum content URI length in bytes
pub const MAX_CONTENT_URI_LEN: usize = 200;

/// Maximum post description length in bytes
pub const MAX_DESCRIPTION_LEN: usize = 500;
