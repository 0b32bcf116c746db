// Like a post: create the caller's Like record and count it
use anchor_lang::prelude::*;

use super::{expect_keys, InstructionAccounts, InstructionContext};
use crate::errors::{remap_error, SocialError};
use crate::lifecycle::{create_record, load_record, store_record};
use crate::pda::{like_seeds, verify_address};
use crate::state::{Like, Post};
use crate::store::AccountStore;
use crate::validation::require_signer;

// ================================
// Instruction Handler
// ================================

/// Record a like by the signer and increment `post.likes`
///
/// The Like address is unique per (post, liker), so a repeated like hits an
/// occupied address and is reported as `AlreadyLiked`.
pub fn like_post<S: AccountStore + ?Sized>(
    ctx: &mut InstructionContext<'_, S>,
    accounts: &LikePost,
) -> Result<()> {
    require_signer(ctx.signers, &accounts.authority)?;

    let mut post: Post = load_record(&*ctx.store, &accounts.post)?;
    verify_address(
        &accounts.like,
        &like_seeds(&accounts.post, &accounts.authority),
        ctx.program_id,
    )?;

    create_record(&mut *ctx.store, accounts.like, &Like {}, &accounts.authority)
        .map_err(|e| remap_error(e, SocialError::AlreadyExists, SocialError::AlreadyLiked))?;

    post.likes = post
        .likes
        .checked_add(1)
        .ok_or_else(|| error!(SocialError::ArithmeticOverflow))?;
    store_record(&mut *ctx.store, &accounts.post, &post)?;

    tracing::info!(
        liker = %accounts.authority,
        post = %accounts.post,
        likes = post.likes,
        "post liked"
    );
    Ok(())
}

// ================================
// Account Context
// ================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LikePost {
    /// Like PDA: `[LIKE_SEED, post, authority]`
    pub like: Pubkey,
    pub post: Pubkey,
    /// Liker; funds the Like reservation
    pub authority: Pubkey,
}

impl InstructionAccounts for LikePost {
    const COUNT: usize = 3;

    fn from_keys(keys: &[Pubkey]) -> Result<Self> {
        expect_keys(keys, Self::COUNT)?;
        Ok(Self {
            like: keys[0],
            post: keys[1],
            authority: keys[2],
        })
    }

    fn to_keys(&self) -> Vec<Pubkey> {
        vec![self.like, self.post, self.authority]
    }
}
