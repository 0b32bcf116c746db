// Account store abstraction and staged commits
//
// The ledger is an explicit key-value store handed to every operation; there is
// no ambient global state. Handlers never write to the real store directly.
// The processor wraps it in a `StagedAccounts` overlay, the handler reads and
// writes through the overlay, and only a successful handler's `ChangeSet` is
// applied. A failed operation simply drops its overlay, so a composite update
// (post + profile, like + post) is observed either whole or not at all.

use std::collections::BTreeMap;

use anchor_lang::prelude::*;
use anchor_lang::solana_program::clock::Clock;

use crate::errors::ProgramFailure;
use crate::processor::{process_instruction, OperationRequest, TransactionReceipt};
use crate::state::LedgerRecord;

// ================================
// Stored Accounts
// ================================

/// Raw account as held by the store
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoredAccount {
    /// Balance reserved in this account
    pub lamports: u64,
    /// Encoded record; empty for plain wallets
    pub data: Vec<u8>,
    /// Program that owns the account
    pub owner: Pubkey,
}

impl StoredAccount {
    /// A plain wallet holding `lamports`
    pub fn wallet(lamports: u64) -> Self {
        Self {
            lamports,
            data: Vec::new(),
            owner: anchor_lang::system_program::ID,
        }
    }

    /// Whether the account holds record data
    pub fn has_data(&self) -> bool {
        !self.data.is_empty()
    }
}

/// Key-value access to ledger accounts
pub trait AccountStore {
    /// Current contents of `address`, if any
    fn load(&self, address: &Pubkey) -> Option<StoredAccount>;

    /// Overwrite `address`
    fn save(&mut self, address: Pubkey, account: StoredAccount);

    /// Remove `address` entirely
    fn purge(&mut self, address: &Pubkey);
}

// ================================
// Staging Overlay
// ================================

/// Pending writes over a read-only base store
///
/// `None` in the write set marks a purged address.
pub struct StagedAccounts<'a, S: AccountStore + ?Sized> {
    base: &'a S,
    writes: BTreeMap<Pubkey, Option<StoredAccount>>,
}

impl<'a, S: AccountStore + ?Sized> StagedAccounts<'a, S> {
    pub fn new(base: &'a S) -> Self {
        Self {
            base,
            writes: BTreeMap::new(),
        }
    }

    /// Finish staging and hand back the writes to apply
    pub fn into_change_set(self) -> ChangeSet {
        ChangeSet {
            writes: self.writes,
        }
    }
}

impl<S: AccountStore + ?Sized> AccountStore for StagedAccounts<'_, S> {
    fn load(&self, address: &Pubkey) -> Option<StoredAccount> {
        match self.writes.get(address) {
            Some(staged) => staged.clone(),
            None => self.base.load(address),
        }
    }

    fn save(&mut self, address: Pubkey, account: StoredAccount) {
        self.writes.insert(address, Some(account));
    }

    fn purge(&mut self, address: &Pubkey) {
        self.writes.insert(*address, None);
    }
}

/// The writes of one successful operation
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeSet {
    writes: BTreeMap<Pubkey, Option<StoredAccount>>,
}

impl ChangeSet {
    /// Addresses written or purged, in key order
    pub fn touched(&self) -> Vec<Pubkey> {
        self.writes.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Apply every write to `store`
    pub fn apply<S: AccountStore + ?Sized>(self, store: &mut S) {
        for (address, account) in self.writes {
            match account {
                Some(account) => store.save(address, account),
                None => store.purge(&address),
            }
        }
    }
}

// ================================
// In-Memory Ledger
// ================================

/// In-memory ledger: accounts plus a clock
///
/// Each processed operation advances the slot by one.
#[derive(Clone, Debug, Default)]
pub struct Ledger {
    accounts: BTreeMap<Pubkey, StoredAccount>,
    clock: Clock,
}

impl AccountStore for Ledger {
    fn load(&self, address: &Pubkey) -> Option<StoredAccount> {
        self.accounts.get(address).cloned()
    }

    fn save(&mut self, address: Pubkey, account: StoredAccount) {
        self.accounts.insert(address, account);
    }

    fn purge(&mut self, address: &Pubkey) {
        self.accounts.remove(address);
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            accounts: BTreeMap::new(),
            clock,
        }
    }

    /// Rebuild a ledger from exported accounts
    pub fn from_accounts(
        accounts: impl IntoIterator<Item = (Pubkey, StoredAccount)>,
        clock: Clock,
    ) -> Self {
        Self {
            accounts: accounts.into_iter().collect(),
            clock,
        }
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Move ledger time to `unix_timestamp`
    pub fn warp_to_timestamp(&mut self, unix_timestamp: i64) {
        self.clock.unix_timestamp = unix_timestamp;
    }

    /// Credit `lamports` to `address`, creating a wallet if needed
    pub fn airdrop(&mut self, address: &Pubkey, lamports: u64) {
        let account = self
            .accounts
            .entry(*address)
            .or_insert_with(|| StoredAccount::wallet(0));
        account.lamports = account.lamports.saturating_add(lamports);
    }

    pub fn balance(&self, address: &Pubkey) -> u64 {
        self.accounts.get(address).map_or(0, |account| account.lamports)
    }

    pub fn account(&self, address: &Pubkey) -> Option<&StoredAccount> {
        self.accounts.get(address)
    }

    pub fn accounts(&self) -> impl Iterator<Item = (&Pubkey, &StoredAccount)> {
        self.accounts.iter()
    }

    /// Read a record: `Ok(None)` means nothing is stored at `address`
    pub fn fetch<R: LedgerRecord>(&self, address: &Pubkey) -> Result<Option<R>> {
        crate::lifecycle::fetch_record(self, address)
    }

    /// Execute one operation request atomically
    pub fn process(
        &mut self,
        request: &OperationRequest,
    ) -> std::result::Result<TransactionReceipt, ProgramFailure> {
        self.clock.slot = self.clock.slot.saturating_add(1);
        let clock = self.clock.clone();
        process_instruction(self, &clock, request).map_err(ProgramFailure::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_reads_its_own_writes() {
        let mut ledger = Ledger::new();
        let kept = Pubkey::new_unique();
        let purged = Pubkey::new_unique();
        ledger.airdrop(&kept, 10);
        ledger.airdrop(&purged, 20);

        let mut staged = StagedAccounts::new(&ledger);
        staged.save(kept, StoredAccount::wallet(11));
        staged.purge(&purged);

        assert_eq!(staged.load(&kept).unwrap().lamports, 11);
        assert!(staged.load(&purged).is_none());

        // Base is untouched until the change set is applied
        assert_eq!(ledger.balance(&kept), 10);
        assert_eq!(ledger.balance(&purged), 20);
    }

    #[test]
    fn test_change_set_applies_all_writes() {
        let mut ledger = Ledger::new();
        let kept = Pubkey::new_unique();
        let purged = Pubkey::new_unique();
        ledger.airdrop(&purged, 20);

        let mut staged = StagedAccounts::new(&ledger);
        staged.save(kept, StoredAccount::wallet(5));
        staged.purge(&purged);
        let changes = staged.into_change_set();
        assert_eq!(changes.len(), 2);

        changes.apply(&mut ledger);
        assert_eq!(ledger.balance(&kept), 5);
        assert!(ledger.account(&purged).is_none());
    }

    #[test]
    fn test_dropped_overlay_leaves_no_trace() {
        let mut ledger = Ledger::new();
        let address = Pubkey::new_unique();
        ledger.airdrop(&address, 1);

        {
            let mut staged = StagedAccounts::new(&ledger);
            staged.purge(&address);
        }

        assert_eq!(ledger.balance(&address), 1);
    }

    #[test]
    fn test_airdrop_accumulates() {
        let mut ledger = Ledger::new();
        let wallet = Pubkey::new_unique();
        ledger.airdrop(&wallet, 3);
        ledger.airdrop(&wallet, 4);
        assert_eq!(ledger.balance(&wallet), 7);
        assert!(!ledger.account(&wallet).unwrap().has_data());
    }
}
