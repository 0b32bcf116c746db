// Register a profile for the signing authority
use anchor_lang::prelude::*;

use super::{expect_keys, InstructionAccounts, InstructionContext};
use crate::lifecycle::create_record;
use crate::pda::{user_profile_seeds, verify_address};
use crate::state::UserProfile;
use crate::store::AccountStore;
use crate::validation::{require_signer, validate_username};

// ================================
// Instruction Handler
// ================================

/// Create the caller's profile with `post_count = 0`
///
/// The profile address is derived from the authority alone, so a second
/// registration by the same authority fails with `AlreadyExists`.
pub fn register_user<S: AccountStore + ?Sized>(
    ctx: &mut InstructionContext<'_, S>,
    accounts: &RegisterUser,
    username: String,
) -> Result<()> {
    require_signer(ctx.signers, &accounts.authority)?;
    validate_username(&username)?;
    verify_address(
        &accounts.user_profile,
        &user_profile_seeds(&accounts.authority),
        ctx.program_id,
    )?;

    let profile = UserProfile::new(accounts.authority, username);
    create_record(&mut *ctx.store, accounts.user_profile, &profile, &accounts.authority)?;

    tracing::info!(
        authority = %accounts.authority,
        profile = %accounts.user_profile,
        username = %profile.username,
        "user registered"
    );
    Ok(())
}

// ================================
// Account Context
// ================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterUser {
    /// Profile PDA: `[USER_PROFILE_SEED, authority]`
    pub user_profile: Pubkey,
    /// Signer that owns and funds the profile
    pub authority: Pubkey,
}

impl InstructionAccounts for RegisterUser {
    const COUNT: usize = 2;

    fn from_keys(keys: &[Pubkey]) -> Result<Self> {
        expect_keys(keys, Self::COUNT)?;
        Ok(Self {
            user_profile: keys[0],
            authority: keys[1],
        })
    }

    fn to_keys(&self) -> Vec<Pubkey> {
        vec![self.user_profile, self.authority]
    }
}
