#![allow(dead_code)]

use anchor_lang::prelude::*;
use anchor_lang::solana_program::clock::Clock;

use social_ledger::pda::{find_like_address, find_post_address, find_user_profile_address};
use social_ledger::{
    CreatePost, DeletePost, InstructionAccounts, Ledger, LikePost, OperationRequest, Post,
    ProgramFailure, RegisterUser, SocialError, SocialInstruction, StoredAccount,
    TransactionReceipt, UnlikePost, UserProfile,
};

pub const STARTING_LAMPORTS: u64 = 10_000_000_000; // 10 SOL
pub const GENESIS_TIMESTAMP: i64 = 1_700_000_000;

pub type TxResult = std::result::Result<TransactionReceipt, ProgramFailure>;

pub struct TestLedger {
    pub ledger: Ledger,
}

impl TestLedger {
    pub fn new() -> Self {
        let clock = Clock {
            unix_timestamp: GENESIS_TIMESTAMP,
            ..Clock::default()
        };
        Self {
            ledger: Ledger::with_clock(clock),
        }
    }

    /// A fresh identity holding `STARTING_LAMPORTS`
    pub fn funded_user(&mut self) -> Pubkey {
        let user = Pubkey::new_unique();
        self.ledger.airdrop(&user, STARTING_LAMPORTS);
        user
    }

    /// A funded identity with a registered profile
    pub fn registered_user(&mut self, username: &str) -> Pubkey {
        let user = self.funded_user();
        self.register_user(user, username).unwrap();
        user
    }

    pub fn submit<A: InstructionAccounts>(
        &mut self,
        accounts: &A,
        instruction: SocialInstruction,
        signer: Pubkey,
    ) -> TxResult {
        let request = OperationRequest::new(accounts, &instruction, vec![signer])
            .map_err(ProgramFailure::from)?;
        self.ledger.process(&request)
    }

    pub fn initialize(&mut self) -> TxResult {
        let request = OperationRequest::new(
            &social_ledger::Initialize,
            &SocialInstruction::Initialize,
            vec![],
        )
        .map_err(ProgramFailure::from)?;
        self.ledger.process(&request)
    }

    pub fn register_user(&mut self, authority: Pubkey, username: &str) -> TxResult {
        let (user_profile, _) = find_user_profile_address(&authority);
        self.submit(
            &RegisterUser {
                user_profile,
                authority,
            },
            SocialInstruction::RegisterUser {
                username: username.to_string(),
            },
            authority,
        )
    }

    /// Create a post at the author's next index, returning its address
    pub fn create_post(
        &mut self,
        authority: Pubkey,
        content_uri: &str,
        description: &str,
    ) -> std::result::Result<Pubkey, ProgramFailure> {
        let index = self.profile(&authority).map_or(0, |p| p.post_count);
        let (post, _) = find_post_address(&authority, index);
        let (user_profile, _) = find_user_profile_address(&authority);
        self.submit(
            &CreatePost {
                post,
                user_profile,
                authority,
            },
            SocialInstruction::CreatePost {
                content_uri: content_uri.to_string(),
                description: description.to_string(),
            },
            authority,
        )?;
        Ok(post)
    }

    pub fn delete_post(&mut self, authority: Pubkey, post: Pubkey) -> TxResult {
        let (user_profile, _) = find_user_profile_address(&authority);
        self.submit(
            &DeletePost {
                post,
                user_profile,
                authority,
            },
            SocialInstruction::DeletePost,
            authority,
        )
    }

    pub fn like(&mut self, liker: Pubkey, post: Pubkey) -> TxResult {
        let (like, _) = find_like_address(&post, &liker);
        self.submit(
            &LikePost {
                like,
                post,
                authority: liker,
            },
            SocialInstruction::LikePost,
            liker,
        )
    }

    pub fn unlike(&mut self, liker: Pubkey, post: Pubkey) -> TxResult {
        let (like, _) = find_like_address(&post, &liker);
        self.submit(
            &UnlikePost {
                like,
                post,
                authority: liker,
            },
            SocialInstruction::UnlikePost,
            liker,
        )
    }

    pub fn profile(&self, authority: &Pubkey) -> Option<UserProfile> {
        let (address, _) = find_user_profile_address(authority);
        self.ledger.fetch(&address).unwrap()
    }

    pub fn post(&self, address: &Pubkey) -> Option<Post> {
        self.ledger.fetch(address).unwrap()
    }

    pub fn has_liked(&self, liker: &Pubkey, post: &Pubkey) -> bool {
        let (like, _) = find_like_address(post, liker);
        self.ledger.fetch::<social_ledger::Like>(&like).unwrap().is_some()
    }

    pub fn balance(&self, address: &Pubkey) -> u64 {
        self.ledger.balance(address)
    }

    /// Full copy of every stored account
    pub fn snapshot(&self) -> Vec<(Pubkey, StoredAccount)> {
        self.ledger
            .accounts()
            .map(|(address, account)| (*address, account.clone()))
            .collect()
    }
}

pub fn assert_fails_with(result: TxResult, kind: SocialError) {
    match result {
        Ok(receipt) => panic!("expected {kind:?}, operation committed: {receipt:?}"),
        Err(failure) => assert!(failure.is(kind), "expected {kind:?}, got {failure}"),
    }
}
