use anchor_lang::prelude::*;

use super::LedgerRecord;
use crate::validation::validate_username;
use crate::MAX_USERNAME_LEN;

/// One profile per authority, stored at `[USER_PROFILE_SEED, authority]`
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct UserProfile {
    /// Owner of the profile; never changes after registration
    pub authority: Pubkey,
    /// Display name, at most `MAX_USERNAME_LEN` bytes
    pub username: String,
    /// Index generator for posts; only ever incremented
    pub post_count: u64,
}

impl UserProfile {
    pub fn new(authority: Pubkey, username: String) -> Self {
        Self {
            authority,
            username,
            post_count: 0,
        }
    }
}

impl LedgerRecord for UserProfile {
    const SPACE: usize = 8 + // discriminator
        32 + // authority
        4 + MAX_USERNAME_LEN + // username
        8; // post_count

    const KIND: &'static str = "UserProfile";

    fn check_capacity(&self) -> Result<()> {
        validate_username(&self.username)
    }
}
