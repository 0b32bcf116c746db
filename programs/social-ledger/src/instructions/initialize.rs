// Initialize instruction for the social ledger
// Touches no accounts; succeeds whenever the program is reachable
use anchor_lang::prelude::*;

use super::{InstructionAccounts, InstructionContext};
use crate::store::AccountStore;

// ================================
// Instruction Handler
// ================================

/// Existence check for the ledger program
pub fn initialize<S: AccountStore + ?Sized>(
    ctx: &mut InstructionContext<'_, S>,
    _accounts: &Initialize,
) -> Result<()> {
    tracing::info!(program_id = %ctx.program_id, slot = ctx.clock.slot, "social ledger initialized");
    Ok(())
}

// ================================
// Account Context
// ================================

/// Account list for program initialization (empty)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Initialize;

impl InstructionAccounts for Initialize {
    const COUNT: usize = 0;

    fn from_keys(_keys: &[Pubkey]) -> Result<Self> {
        Ok(Self)
    }

    fn to_keys(&self) -> Vec<Pubkey> {
        Vec::new()
    }
}
