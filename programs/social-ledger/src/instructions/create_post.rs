// Publish a post at the author's next post index
use anchor_lang::prelude::*;

use super::{expect_keys, InstructionAccounts, InstructionContext};
use crate::errors::SocialError;
use crate::lifecycle::{create_record, load_record, store_record};
use crate::pda::{post_seeds, user_profile_seeds, verify_address};
use crate::state::{Post, UserProfile};
use crate::store::AccountStore;
use crate::validation::{
    require_authority, require_signer, validate_content_uri, validate_description,
};

// ================================
// Instruction Handler
// ================================

/// Create a post at index `profile.post_count`, then bump the counter
///
/// Both writes land in the same staged change set.
pub fn create_post<S: AccountStore + ?Sized>(
    ctx: &mut InstructionContext<'_, S>,
    accounts: &CreatePost,
    content_uri: String,
    description: String,
) -> Result<()> {
    require_signer(ctx.signers, &accounts.authority)?;
    validate_content_uri(&content_uri)?;
    validate_description(&description)?;

    let mut profile: UserProfile = load_record(&*ctx.store, &accounts.user_profile)?;
    require_authority(&profile.authority, &accounts.authority)?;
    verify_address(
        &accounts.user_profile,
        &user_profile_seeds(&accounts.authority),
        ctx.program_id,
    )?;

    let index = profile.post_count;
    let index_bytes = index.to_le_bytes();
    verify_address(
        &accounts.post,
        &post_seeds(&accounts.authority, &index_bytes),
        ctx.program_id,
    )?;

    let post = Post {
        authority: accounts.authority,
        content_uri,
        description,
        likes: 0,
        created_at: ctx.clock.unix_timestamp,
    };
    create_record(&mut *ctx.store, accounts.post, &post, &accounts.authority)?;

    profile.post_count = index
        .checked_add(1)
        .ok_or_else(|| error!(SocialError::ArithmeticOverflow))?;
    store_record(&mut *ctx.store, &accounts.user_profile, &profile)?;

    tracing::info!(
        authority = %accounts.authority,
        post = %accounts.post,
        index,
        created_at = post.created_at,
        "post created"
    );
    Ok(())
}

// ================================
// Account Context
// ================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CreatePost {
    /// Post PDA: `[POST_SEED, authority, post_count_le]`
    pub post: Pubkey,
    /// Author's profile PDA
    pub user_profile: Pubkey,
    /// Author; funds the post's reservation
    pub authority: Pubkey,
}

impl InstructionAccounts for CreatePost {
    const COUNT: usize = 3;

    fn from_keys(keys: &[Pubkey]) -> Result<Self> {
        expect_keys(keys, Self::COUNT)?;
        Ok(Self {
            post: keys[0],
            user_profile: keys[1],
            authority: keys[2],
        })
    }

    fn to_keys(&self) -> Vec<Pubkey> {
        vec![self.post, self.user_profile, self.authority]
    }
}
