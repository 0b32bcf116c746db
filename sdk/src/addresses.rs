//! Address derivation helpers
//!
//! Clients derive every record address locally before submitting a request.
//! These wrap the program's own derivation so both sides always agree.

use anchor_lang::prelude::Pubkey;
use social_ledger::pda::{find_like_address, find_post_address, find_user_profile_address};

/// Profile address of `authority`
pub fn profile_address(authority: &Pubkey) -> Pubkey {
    find_user_profile_address(authority).0
}

/// Address of post number `index` by `authority`
pub fn post_address(authority: &Pubkey, index: u64) -> Pubkey {
    find_post_address(authority, index).0
}

/// Address of the like `liker` would hold on `post`
pub fn like_address(post: &Pubkey, liker: &Pubkey) -> Pubkey {
    find_like_address(post, liker).0
}

/// Every post address `authority` has ever been assigned, in index order
///
/// Deleted posts keep their slot, so some of these may be empty.
pub fn post_addresses(authority: &Pubkey, post_count: u64) -> Vec<(u64, Pubkey)> {
    (0..post_count)
        .map(|index| (index, post_address(authority, index)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_addresses_follow_index_order() {
        let author = Pubkey::new_unique();
        let addresses = post_addresses(&author, 3);
        assert_eq!(addresses.len(), 3);
        for (index, address) in addresses {
            assert_eq!(address, post_address(&author, index));
        }
    }

    #[test]
    fn test_like_address_depends_on_liker() {
        let post = Pubkey::new_unique();
        assert_ne!(
            like_address(&post, &Pubkey::new_unique()),
            like_address(&post, &Pubkey::new_unique())
        );
    }
}
