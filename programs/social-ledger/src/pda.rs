// Deterministic address derivation for ledger records
//
// Every record address is a pure function of its seeds and the program id. The
// bump search walks 255 down to 0 and stops at the first candidate that falls
// off the ed25519 curve, which is the order every Solana client uses, so an
// address computed here can be recomputed offline by any caller.

use anchor_lang::prelude::*;

use crate::errors::SocialError;
use crate::{LIKE_SEED, POST_SEED, USER_PROFILE_SEED};

/// Maximum number of seeds, including the bump
pub const MAX_SEEDS: usize = 16;

/// Maximum length of a single seed
pub const MAX_SEED_LEN: usize = 32;

/// Derive a program address and its bump from `seeds`
///
/// # Errors
/// `AddressDerivationFailed` if the seeds are malformed or no bump in the
/// search space yields an off-curve address.
pub fn derive_address(seeds: &[&[u8]], program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    require!(seeds.len() < MAX_SEEDS, SocialError::AddressDerivationFailed);
    require!(
        seeds.iter().all(|seed| seed.len() <= MAX_SEED_LEN),
        SocialError::AddressDerivationFailed
    );

    for bump in (0..=u8::MAX).rev() {
        let bump_seed = [bump];
        let mut with_bump: Vec<&[u8]> = seeds.to_vec();
        with_bump.push(&bump_seed);
        if let Ok(address) = Pubkey::create_program_address(&with_bump, program_id) {
            return Ok((address, bump));
        }
    }

    err!(SocialError::AddressDerivationFailed)
}

/// Check that `supplied` is the address derived from `seeds`, returning the bump
pub fn verify_address(supplied: &Pubkey, seeds: &[&[u8]], program_id: &Pubkey) -> Result<u8> {
    let (expected, bump) = derive_address(seeds, program_id)?;
    require_keys_eq!(*supplied, expected, SocialError::AddressMismatch);
    Ok(bump)
}

// ================================
// Record Seeds
// ================================

/// Seeds for the profile owned by `authority`
pub fn user_profile_seeds(authority: &Pubkey) -> [&[u8]; 2] {
    [USER_PROFILE_SEED, authority.as_ref()]
}

/// Seeds for the post `index` of `authority`; `index` must be little-endian
pub fn post_seeds<'a>(authority: &'a Pubkey, index: &'a [u8; 8]) -> [&'a [u8]; 3] {
    [POST_SEED, authority.as_ref(), index.as_ref()]
}

/// Seeds for the like of `post` by `liker`
pub fn like_seeds<'a>(post: &'a Pubkey, liker: &'a Pubkey) -> [&'a [u8]; 3] {
    [LIKE_SEED, post.as_ref(), liker.as_ref()]
}

// ================================
// Address Helpers
// ================================
// The seed layouts above are fixed and in range, so these use the infallible
// search directly. Both searches walk the bump space in the same order.

/// Profile address and bump for `authority`
pub fn find_user_profile_address(authority: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&user_profile_seeds(authority), &crate::ID)
}

/// Post address and bump for post `index` of `authority`
pub fn find_post_address(authority: &Pubkey, index: u64) -> (Pubkey, u8) {
    let index = index.to_le_bytes();
    Pubkey::find_program_address(&post_seeds(authority, &index), &crate::ID)
}

/// Like address and bump for `liker` on `post`
pub fn find_like_address(post: &Pubkey, liker: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&like_seeds(post, liker), &crate::ID)
}
