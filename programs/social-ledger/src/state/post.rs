use anchor_lang::prelude::*;

use super::LedgerRecord;
use crate::validation::{validate_content_uri, validate_description};
use crate::{MAX_CONTENT_URI_LEN, MAX_DESCRIPTION_LEN};

/// A published post, stored at `[POST_SEED, authority, index_le]`
///
/// `likes` always equals the number of live [`Like`](super::Like) records
/// derived from this post's address.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct Post {
    pub authority: Pubkey,
    pub content_uri: String,
    pub description: String,
    pub likes: u64,
    /// Ledger unix timestamp at creation
    pub created_at: i64,
}

impl LedgerRecord for Post {
    const SPACE: usize = 8 + // discriminator
        32 + // authority
        4 + MAX_CONTENT_URI_LEN + // content_uri
        4 + MAX_DESCRIPTION_LEN + // description
        8 + // likes
        8; // created_at

    const KIND: &'static str = "Post";

    fn check_capacity(&self) -> Result<()> {
        validate_content_uri(&self.content_uri)?;
        validate_description(&self.description)
    }
}
