// Record schema and fixed-capacity codec
//
// Three record kinds live on the ledger. Each one is laid out as an 8-byte
// discriminator followed by its Borsh-encoded fields, and each reserves storage
// for the largest value it can ever hold: fixed-width fields plus the declared
// capacity (and length prefix) of every string.
//
// Encoding checks capacities before producing a single byte. Decoding checks the
// discriminator first and capacities last, so a record of the wrong kind or one
// carrying an oversized string is refused with a specific error.

pub mod like;
pub mod post;
pub mod user_profile;

pub use like::*;
pub use post::*;
pub use user_profile::*;

use crate::errors::SocialError;
use anchor_lang::prelude::*;
use anchor_lang::Discriminator;

/// A record kind stored at a derived address
pub trait LedgerRecord: AnchorSerialize + AnchorDeserialize + Discriminator + Sized {
    /// Reserved size on the ledger, discriminator included
    const SPACE: usize;

    /// Record kind name used in logs
    const KIND: &'static str;

    /// Check every bounded field against its declared capacity
    fn check_capacity(&self) -> Result<()>;

    /// Encode into a buffer of exactly [`Self::SPACE`] bytes
    fn encode(&self) -> Result<Vec<u8>> {
        self.check_capacity()?;

        let mut data = Vec::with_capacity(Self::SPACE);
        data.extend_from_slice(&Self::DISCRIMINATOR[..]);
        AnchorSerialize::serialize(self, &mut data)
            .map_err(|_| error!(SocialError::AccountDidNotSerialize))?;
        require!(data.len() <= Self::SPACE, SocialError::AccountDidNotSerialize);

        data.resize(Self::SPACE, 0);
        Ok(data)
    }

    /// Decode a stored buffer, rejecting foreign kinds and oversized fields
    fn decode(data: &[u8]) -> Result<Self> {
        let discriminator = &Self::DISCRIMINATOR[..];
        require!(
            data.len() >= discriminator.len(),
            SocialError::AccountDataTooSmall
        );
        require!(
            &data[..discriminator.len()] == discriminator,
            SocialError::DiscriminatorMismatch
        );

        let mut body = &data[discriminator.len()..];
        let record = <Self as AnchorDeserialize>::deserialize(&mut body)
            .map_err(|_| error!(SocialError::AccountDidNotDeserialize))?;
        record.check_capacity()?;
        Ok(record)
    }
}
