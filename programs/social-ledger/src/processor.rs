// Request decoding, dispatch and staged commit
//
// A request is decoded, bound to its positional accounts and handed to exactly
// one handler that runs against a staging overlay. The overlay's change set is
// applied to the store only when the handler returns Ok.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::clock::Clock;

use crate::errors::SocialError;
use crate::instructions::*;
use crate::store::{AccountStore, StagedAccounts};

/// One operation submitted to the ledger
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperationRequest {
    pub program_id: Pubkey,
    /// Positional account keys, in the order the instruction expects
    pub accounts: Vec<Pubkey>,
    /// Identities that signed the request
    pub signers: Vec<Pubkey>,
    /// Discriminator followed by Borsh arguments
    pub data: Vec<u8>,
}

impl OperationRequest {
    pub fn new<A: InstructionAccounts>(
        accounts: &A,
        instruction: &SocialInstruction,
        signers: Vec<Pubkey>,
    ) -> Result<Self> {
        Ok(Self {
            program_id: crate::ID,
            accounts: accounts.to_keys(),
            signers,
            data: instruction.pack()?,
        })
    }
}

/// Outcome of a committed operation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub instruction: String,
    pub slot: u64,
    pub unix_timestamp: i64,
    /// Addresses written or closed, in key order
    pub touched: Vec<Pubkey>,
}

/// Execute `request` against `store`, all or nothing
///
/// # Errors
/// `IncorrectProgramId` for a request addressed elsewhere, any decoding error,
/// or the handler's error. On error `store` is left exactly as it was.
pub fn process_instruction<S: AccountStore + ?Sized>(
    store: &mut S,
    clock: &Clock,
    request: &OperationRequest,
) -> Result<TransactionReceipt> {
    require_keys_eq!(request.program_id, crate::ID, SocialError::IncorrectProgramId);
    let instruction = SocialInstruction::unpack(&request.data)?;
    let name = instruction.name();

    let mut staged = StagedAccounts::new(&*store);
    let mut ctx = InstructionContext {
        program_id: &request.program_id,
        store: &mut staged,
        signers: &request.signers,
        clock,
    };
    if let Err(e) = dispatch(&mut ctx, &request.accounts, instruction) {
        tracing::warn!(instruction = name, slot = clock.slot, error = %e, "operation rejected");
        return Err(e);
    }

    let changes = staged.into_change_set();
    let touched = changes.touched();
    changes.apply(store);

    tracing::debug!(instruction = name, slot = clock.slot, touched = touched.len(), "operation committed");
    Ok(TransactionReceipt {
        instruction: name.to_string(),
        slot: clock.slot,
        unix_timestamp: clock.unix_timestamp,
        touched,
    })
}

fn dispatch<S: AccountStore + ?Sized>(
    ctx: &mut InstructionContext<'_, S>,
    keys: &[Pubkey],
    instruction: SocialInstruction,
) -> Result<()> {
    match instruction {
        SocialInstruction::Initialize => initialize(ctx, &Initialize::from_keys(keys)?),
        SocialInstruction::RegisterUser { username } => {
            register_user(ctx, &RegisterUser::from_keys(keys)?, username)
        }
        SocialInstruction::CreatePost {
            content_uri,
            description,
        } => create_post(ctx, &CreatePost::from_keys(keys)?, content_uri, description),
        SocialInstruction::DeletePost => delete_post(ctx, &DeletePost::from_keys(keys)?),
        SocialInstruction::LikePost => like_post(ctx, &LikePost::from_keys(keys)?),
        SocialInstruction::UnlikePost => unlike_post(ctx, &UnlikePost::from_keys(keys)?),
    }
}
