// Delete a post and refund its reservation to the author
use anchor_lang::prelude::*;

use super::{expect_keys, InstructionAccounts, InstructionContext};
use crate::lifecycle::{close_record, load_record};
use crate::pda::{user_profile_seeds, verify_address};
use crate::state::{Post, UserProfile};
use crate::store::AccountStore;
use crate::validation::{require_authority, require_signer};

// ================================
// Instruction Handler
// ================================

/// Close a post owned by the caller
///
/// `post_count` is left as is: post indices are never reused, so a deleted
/// post leaves a gap in its author's sequence.
pub fn delete_post<S: AccountStore + ?Sized>(
    ctx: &mut InstructionContext<'_, S>,
    accounts: &DeletePost,
) -> Result<()> {
    require_signer(ctx.signers, &accounts.authority)?;

    let profile: UserProfile = load_record(&*ctx.store, &accounts.user_profile)?;
    let post: Post = load_record(&*ctx.store, &accounts.post)?;

    require_authority(&post.authority, &accounts.authority)?;
    require_authority(&profile.authority, &accounts.authority)?;
    verify_address(
        &accounts.user_profile,
        &user_profile_seeds(&accounts.authority),
        ctx.program_id,
    )?;

    let refund = close_record::<_, Post>(&mut *ctx.store, &accounts.post, &accounts.authority)?;

    tracing::info!(
        authority = %accounts.authority,
        post = %accounts.post,
        refund,
        likes = post.likes,
        "post deleted"
    );
    Ok(())
}

// ================================
// Account Context
// ================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeletePost {
    pub post: Pubkey,
    /// Author's profile PDA
    pub user_profile: Pubkey,
    /// Author; receives the refund
    pub authority: Pubkey,
}

impl InstructionAccounts for DeletePost {
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
