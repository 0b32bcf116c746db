// Instruction module for the social ledger
// Exports all instruction handlers, their account lists and the wire format
use anchor_lang::prelude::*;
use anchor_lang::solana_program::clock::Clock;
use sha2::{Digest, Sha256};

use crate::errors::SocialError;
use crate::store::AccountStore;

pub mod create_post;
pub mod delete_post;
pub mod initialize;
pub mod like_post;
pub mod register_user;
pub mod unlike_post;

pub use create_post::*;
pub use delete_post::*;
pub use initialize::*;
pub use like_post::*;
pub use register_user::*;
pub use unlike_post::*;

// ================================
// Execution Context
// ================================

/// Everything a handler may touch while it runs
///
/// `store` is the staging overlay, never the committed ledger.
pub struct InstructionContext<'a, S: AccountStore + ?Sized> {
    pub program_id: &'a Pubkey,
    pub store: &'a mut S,
    pub signers: &'a [Pubkey],
    pub clock: &'a Clock,
}

/// Positional account list of one instruction
pub trait InstructionAccounts: Sized {
    /// Number of account keys the instruction expects
    const COUNT: usize;

    /// Bind positional keys; extra trailing keys are ignored
    fn from_keys(keys: &[Pubkey]) -> Result<Self>;

    fn to_keys(&self) -> Vec<Pubkey>;
}

/// Fail with `NotEnoughAccountKeys` unless `keys` holds at least `count` entries
pub(crate) fn expect_keys(keys: &[Pubkey], count: usize) -> Result<()> {
    require!(keys.len() >= count, SocialError::NotEnoughAccountKeys);
    Ok(())
}

// ================================
// Wire Format
// ================================

#[derive(AnchorSerialize, AnchorDeserialize)]
struct RegisterUserArgs {
    username: String,
}

#[derive(AnchorSerialize, AnchorDeserialize)]
struct CreatePostArgs {
    content_uri: String,
    description: String,
}

/// Decoded instruction data
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SocialInstruction {
    Initialize,
    RegisterUser {
        username: String,
    },
    CreatePost {
        content_uri: String,
        description: String,
    },
    DeletePost,
    LikePost,
    UnlikePost,
}

type ArgsDecoder = fn(&mut &[u8]) -> Result<SocialInstruction>;

/// Instruction names in wire order, each with the decoder for its arguments
const INSTRUCTIONS: [(&str, ArgsDecoder); 6] = [
    ("initialize", decode_initialize),
    ("register_user", decode_register_user),
    ("create_post", decode_create_post),
    ("delete_post", decode_delete_post),
    ("like_post", decode_like_post),
    ("unlike_post", decode_unlike_post),
];

impl SocialInstruction {
    /// Every instruction name, in wire order
    pub fn names() -> impl Iterator<Item = &'static str> {
        INSTRUCTIONS.into_iter().map(|(name, _)| name)
    }

    fn position(&self) -> usize {
        match self {
            Self::Initialize => 0,
            Self::RegisterUser { .. } => 1,
            Self::CreatePost { .. } => 2,
            Self::DeletePost => 3,
            Self::LikePost => 4,
            Self::UnlikePost => 5,
        }
    }

    /// Snake-case instruction name
    pub fn name(&self) -> &'static str {
        INSTRUCTIONS[self.position()].0
    }

    /// `sha256("global:<name>")[..8]`
    pub fn discriminator_for(name: &str) -> [u8; 8] {
        let hash = Sha256::digest(format!("global:{name}").as_bytes());
        let mut discriminator = [0u8; 8];
        discriminator.copy_from_slice(&hash[..8]);
        discriminator
    }

    pub fn discriminator(&self) -> [u8; 8] {
        Self::discriminator_for(self.name())
    }

    /// Encode as discriminator followed by Borsh arguments
    pub fn pack(&self) -> Result<Vec<u8>> {
        let mut data = self.discriminator().to_vec();
        let written = match self {
            Self::RegisterUser { username } => RegisterUserArgs {
                username: username.clone(),
            }
            .serialize(&mut data),
            Self::CreatePost {
                content_uri,
                description,
            } => CreatePostArgs {
                content_uri: content_uri.clone(),
                description: description.clone(),
            }
            .serialize(&mut data),
            Self::Initialize | Self::DeletePost | Self::LikePost | Self::UnlikePost => Ok(()),
        };
        written.map_err(|_| error!(SocialError::InvalidInstructionData))?;
        Ok(data)
    }

    /// Decode instruction data
    ///
    /// # Errors
    /// `InvalidInstructionData` for short data, an unknown discriminator or
    /// arguments that do not decode.
    pub fn unpack(data: &[u8]) -> Result<Self> {
        require!(data.len() >= 8, SocialError::InvalidInstructionData);
        let (tag, mut args) = data.split_at(8);

        let (_, decode) = INSTRUCTIONS
            .into_iter()
            .find(|(name, _)| Self::discriminator_for(name)[..] == *tag)
            .ok_or_else(|| error!(SocialError::InvalidInstructionData))?;
        decode(&mut args)
    }
}

fn decode_args<T: AnchorDeserialize>(args: &mut &[u8]) -> Result<T> {
    T::deserialize(args).map_err(|_| error!(SocialError::InvalidInstructionData))
}

fn decode_initialize(_: &mut &[u8]) -> Result<SocialInstruction> {
    Ok(SocialInstruction::Initialize)
}

fn decode_register_user(args: &mut &[u8]) -> Result<SocialInstruction> {
    let RegisterUserArgs { username } = decode_args(args)?;
    Ok(SocialInstruction::RegisterUser { username })
}

fn decode_create_post(args: &mut &[u8]) -> Result<SocialInstruction> {
    let CreatePostArgs {
        content_uri,
        description,
    } = decode_args(args)?;
    Ok(SocialInstruction::CreatePost {
        content_uri,
        description,
    })
}

fn decode_delete_post(_: &mut &[u8]) -> Result<SocialInstruction> {
    Ok(SocialInstruction::DeletePost)
}

fn decode_like_post(_: &mut &[u8]) -> Result<SocialInstruction> {
    Ok(SocialInstruction::LikePost)
}

fn decode_unlike_post(_: &mut &[u8]) -> Result<SocialInstruction> {
    Ok(SocialInstruction::UnlikePost)
}
