use anchor_lang::prelude::*;

use super::LedgerRecord;

/// Marker record at `[LIKE_SEED, post, liker]`; its existence is the like
#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Like {}

impl LedgerRecord for Like {
    const SPACE: usize = 8; // discriminator

    const KIND: &'static str = "Like";

    fn check_capacity(&self) -> Result<()> {
        Ok(())
    }
}
