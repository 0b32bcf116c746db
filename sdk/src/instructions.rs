//! Operation request builders
//!
//! Each builder derives the addresses its instruction needs and lays them out in
//! the order the program expects. The acting identity is the only signer.

use anchor_lang::prelude::Pubkey;
use social_ledger::{
    CreatePost, DeletePost, Initialize, InstructionAccounts, LikePost, OperationRequest,
    RegisterUser, SocialInstruction, UnlikePost,
};

use crate::addresses::{like_address, post_address, profile_address};
use crate::error::{ClientError, Result};

fn build<A: InstructionAccounts>(
    accounts: &A,
    instruction: &SocialInstruction,
    signers: Vec<Pubkey>,
) -> Result<OperationRequest> {
    OperationRequest::new(accounts, instruction, signers)
        .map_err(|e| ClientError::Request(e.to_string()))
}

pub fn initialize() -> Result<OperationRequest> {
    build(&Initialize, &SocialInstruction::Initialize, Vec::new())
}

pub fn register_user(authority: Pubkey, username: &str) -> Result<OperationRequest> {
    let accounts = RegisterUser {
        user_profile: profile_address(&authority),
        authority,
    };
    let instruction = SocialInstruction::RegisterUser {
        username: username.to_string(),
    };
    build(&accounts, &instruction, vec![authority])
}

/// Create post `index`; `index` must be the author's current `post_count`
pub fn create_post(
    authority: Pubkey,
    index: u64,
    content_uri: &str,
    description: &str,
) -> Result<OperationRequest> {
    let accounts = CreatePost {
        post: post_address(&authority, index),
        user_profile: profile_address(&authority),
        authority,
    };
    let instruction = SocialInstruction::CreatePost {
        content_uri: content_uri.to_string(),
        description: description.to_string(),
    };
    build(&accounts, &instruction, vec![authority])
}

pub fn delete_post(authority: Pubkey, post: Pubkey) -> Result<OperationRequest> {
    let accounts = DeletePost {
        post,
        user_profile: profile_address(&authority),
        authority,
    };
    build(&accounts, &SocialInstruction::DeletePost, vec![authority])
}

pub fn like_post(liker: Pubkey, post: Pubkey) -> Result<OperationRequest> {
    let accounts = LikePost {
        like: like_address(&post, &liker),
        post,
        authority: liker,
    };
    build(&accounts, &SocialInstruction::LikePost, vec![liker])
}

pub fn unlike_post(liker: Pubkey, post: Pubkey) -> Result<OperationRequest> {
    let accounts = UnlikePost {
        like: like_address(&post, &liker),
        post,
        authority: liker,
    };
    build(&accounts, &SocialInstruction::UnlikePost, vec![liker])
}
