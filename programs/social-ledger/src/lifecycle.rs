// Record lifecycle: create, read, update and close
//
// Creating a record reserves its full capacity and tops its balance up to the
// rent-exempt minimum for that capacity, debiting the shortfall from the
// funder. Closing a record zeroes its storage, purges the address and refunds
// the entire reserved balance. A closed address is indistinguishable from one
// that never existed, so it can be created again.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::rent::Rent;

use crate::errors::SocialError;
use crate::state::LedgerRecord;
use crate::store::{AccountStore, StoredAccount};

/// Balance a record of `space` bytes must hold to be rent exempt
pub fn rent_exempt_minimum(space: usize) -> u64 {
    Rent::default().minimum_balance(space)
}

/// Load the account at `address`, requiring live program-owned data
fn load_owned<S: AccountStore + ?Sized>(store: &S, address: &Pubkey) -> Result<StoredAccount> {
    let account = store
        .load(address)
        .filter(StoredAccount::has_data)
        .ok_or_else(|| error!(SocialError::DoesNotExist))?;
    require_keys_eq!(
        account.owner,
        crate::ID,
        SocialError::AccountOwnedByWrongProgram
    );
    Ok(account)
}

/// Read and decode the record at `address`
pub fn load_record<S, R>(store: &S, address: &Pubkey) -> Result<R>
where
    S: AccountStore + ?Sized,
    R: LedgerRecord,
{
    let account = load_owned(store, address)?;
    R::decode(&account.data)
}

/// Like [`load_record`], but an empty address reads as `None`
pub fn fetch_record<S, R>(store: &S, address: &Pubkey) -> Result<Option<R>>
where
    S: AccountStore + ?Sized,
    R: LedgerRecord,
{
    match store.load(address) {
        Some(account) if account.has_data() => load_record(store, address).map(Some),
        _ => Ok(None),
    }
}

/// Overwrite an existing record in place
pub fn store_record<S, R>(store: &mut S, address: &Pubkey, record: &R) -> Result<()>
where
    S: AccountStore + ?Sized,
    R: LedgerRecord,
{
    let mut account = load_owned(store, address)?;
    account.data = record.encode()?;
    store.save(*address, account);
    Ok(())
}

/// Create `record` at `address`, funding its rent reservation from `funder`
///
/// Returns the lamports debited from the funder.
///
/// # Errors
/// `AlreadyExists` if the address holds data, `InsufficientFunds` if the funder
/// cannot cover the shortfall, or any capacity error from encoding.
pub fn create_record<S, R>(
    store: &mut S,
    address: Pubkey,
    record: &R,
    funder: &Pubkey,
) -> Result<u64>
where
    S: AccountStore + ?Sized,
    R: LedgerRecord,
{
    let mut account = store.load(&address).unwrap_or_default();
    require!(!account.has_data(), SocialError::AlreadyExists);

    let data = record.encode()?;
    let minimum = rent_exempt_minimum(R::SPACE);
    let shortfall = minimum.saturating_sub(account.lamports);

    if shortfall > 0 {
        let mut payer = store
            .load(funder)
            .ok_or_else(|| error!(SocialError::InsufficientFunds))?;
        payer.lamports = payer
            .lamports
            .checked_sub(shortfall)
            .ok_or_else(|| error!(SocialError::InsufficientFunds))?;
        store.save(*funder, payer);

        account.lamports = account
            .lamports
            .checked_add(shortfall)
            .ok_or_else(|| error!(SocialError::ArithmeticOverflow))?;
    }

    account.data = data;
    account.owner = crate::ID;
    store.save(address, account);

    tracing::debug!(kind = R::KIND, %address, %funder, rent = minimum, "record created");
    Ok(shortfall)
}

/// Close the `R` record at `address`, refunding its balance to `refund_to`
///
/// Returns the refunded lamports.
pub fn close_record<S, R>(store: &mut S, address: &Pubkey, refund_to: &Pubkey) -> Result<u64>
where
    S: AccountStore + ?Sized,
    R: LedgerRecord,
{
    let account = load_owned(store, address)?;
    R::decode(&account.data)?;
    store.purge(address);

    let mut recipient = store
        .load(refund_to)
        .unwrap_or_else(|| StoredAccount::wallet(0));
    recipient.lamports = recipient
        .lamports
        .checked_add(account.lamports)
        .ok_or_else(|| error!(SocialError::ArithmeticOverflow))?;
    store.save(*refund_to, recipient);

    tracing::debug!(kind = R::KIND, %address, %refund_to, refund = account.lamports, "record closed");
    Ok(account.lamports)
}
