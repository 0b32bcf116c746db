//! Typed client over a ledger backend

use anchor_lang::prelude::Pubkey;
use social_ledger::{
    AccountStore, Ledger, LedgerRecord, Like, OperationRequest, Post, ProgramFailure,
    StoredAccount, TransactionReceipt, UserProfile,
};

use crate::addresses::{like_address, post_addresses, profile_address};
use crate::error::{ClientError, Result};
use crate::instructions;
use crate::types::{PostView, ProfileView};

/// Somewhere operations can be submitted and accounts read back
pub trait LedgerBackend {
    fn submit(
        &mut self,
        request: &OperationRequest,
    ) -> std::result::Result<TransactionReceipt, ProgramFailure>;

    fn read(&self, address: &Pubkey) -> Option<StoredAccount>;
}

impl LedgerBackend for Ledger {
    fn submit(
        &mut self,
        request: &OperationRequest,
    ) -> std::result::Result<TransactionReceipt, ProgramFailure> {
        self.process(request)
    }

    fn read(&self, address: &Pubkey) -> Option<StoredAccount> {
        self.load(address)
    }
}

/// Decode a raw account read; an empty address is `Ok(None)`
pub fn decode_account<R: LedgerRecord>(
    address: &Pubkey,
    account: Option<StoredAccount>,
) -> Result<Option<R>> {
    let Some(account) = account.filter(StoredAccount::has_data) else {
        return Ok(None);
    };
    if account.owner != social_ledger::ID {
        return Err(ClientError::ForeignAccount {
            address: *address,
            owner: account.owner,
        });
    }
    R::decode(&account.data)
        .map(Some)
        .map_err(|e| ClientError::Decode {
            address: *address,
            reason: e.to_string(),
        })
}

/// Main client for interacting with the social ledger
pub struct SocialClient<B> {
    backend: B,
}

impl<B: LedgerBackend> SocialClient<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_inner(self) -> B {
        self.backend
    }

    fn submit(&mut self, request: &OperationRequest) -> Result<TransactionReceipt> {
        let receipt = self.backend.submit(request)?;
        tracing::debug!(instruction = %receipt.instruction, slot = receipt.slot, "operation confirmed");
        Ok(receipt)
    }

    // ================================
    // Reads
    // ================================

    pub fn fetch<R: LedgerRecord>(&self, address: &Pubkey) -> Result<Option<R>> {
        decode_account(address, self.backend.read(address))
    }

    /// Profile of `authority`, or `None` if they never registered
    pub fn fetch_profile(&self, authority: &Pubkey) -> Result<Option<UserProfile>> {
        self.fetch(&profile_address(authority))
    }

    pub fn fetch_post(&self, address: &Pubkey) -> Result<Option<Post>> {
        self.fetch(address)
    }

    /// Whether `viewer` currently likes `post`
    pub fn is_liked(&self, post: &Pubkey, viewer: &Pubkey) -> Result<bool> {
        Ok(self.fetch::<Like>(&like_address(post, viewer))?.is_some())
    }

    pub fn profile_view(&self, authority: &Pubkey) -> Result<Option<ProfileView>> {
        let address = profile_address(authority);
        Ok(self
            .fetch::<UserProfile>(&address)?
            .map(|profile| ProfileView::new(address, profile)))
    }

    /// Live posts of `author`, oldest first
    ///
    /// Walks every index below the author's `post_count` and skips deleted
    /// ones. With a `viewer`, each view carries whether they like the post.
    pub fn fetch_posts(&self, author: &Pubkey, viewer: Option<&Pubkey>) -> Result<Vec<PostView>> {
        let Some(profile) = self.fetch_profile(author)? else {
            return Ok(Vec::new());
        };

        let mut views = Vec::new();
        for (index, address) in post_addresses(author, profile.post_count) {
            let Some(post) = self.fetch_post(&address)? else {
                continue;
            };
            let liked = match viewer {
                Some(viewer) => self.is_liked(&address, viewer)?,
                None => false,
            };
            views.push(PostView::new(address, index, post, profile.username.clone(), liked));
        }
        Ok(views)
    }

    // ================================
    // Operations
    // ================================

    pub fn initialize(&mut self) -> Result<TransactionReceipt> {
        self.submit(&instructions::initialize()?)
    }

    pub fn register_user(&mut self, authority: Pubkey, username: &str) -> Result<TransactionReceipt> {
        self.submit(&instructions::register_user(authority, username)?)
    }

    /// Publish a post at the author's next index, returning its address
    pub fn create_post(
        &mut self,
        authority: Pubkey,
        content_uri: &str,
        description: &str,
    ) -> Result<Pubkey> {
        let profile = self
            .fetch_profile(&authority)?
            .ok_or(ClientError::ProfileNotFound(authority))?;
        let request =
            instructions::create_post(authority, profile.post_count, content_uri, description)?;
        self.submit(&request)?;
        Ok(request.accounts[0])
    }

    pub fn delete_post(&mut self, authority: Pubkey, post: Pubkey) -> Result<TransactionReceipt> {
        self.submit(&instructions::delete_post(authority, post)?)
    }

    pub fn like_post(&mut self, liker: Pubkey, post: Pubkey) -> Result<TransactionReceipt> {
        self.submit(&instructions::like_post(liker, post)?)
    }

    pub fn unlike_post(&mut self, liker: Pubkey, post: Pubkey) -> Result<TransactionReceipt> {
        self.submit(&instructions::unlike_post(liker, post)?)
    }

    /// Like `post` if `liker` has not yet, otherwise withdraw the like
    ///
    /// Returns whether the post is liked afterwards.
    pub fn toggle_like(&mut self, liker: Pubkey, post: Pubkey) -> Result<bool> {
        if self.is_liked(&post, &liker)? {
            self.unlike_post(liker, post)?;
            Ok(false)
        } else {
            self.like_post(liker, post)?;
            Ok(true)
        }
    }
}
