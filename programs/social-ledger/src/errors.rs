// Error system for the social ledger
//
// Every handler aborts with exactly one of these kinds and leaves the store
// untouched. The order of the first three variants fixes their wire codes
// (6000, 6001, 6002) and must not change.
//
// CATEGORIES:
// - Bounds violations, raised by explicit length checks before any write
// - Authorization violations
// - Lifecycle conflicts (create on an occupied address, close on an empty one)
// - Address integrity violations
// - Account, codec and request decoding failures

use anchor_lang::error::Error;
use anchor_lang::prelude::error_code;

#[error_code]
pub enum SocialError {
    // ===== Bounds =====
    #[msg("Username is too long")]
    UsernameTooLong, // 6000

    #[msg("Content URI is too long")]
    ContentUriTooLong, // 6001

    #[msg("Description is too long")]
    DescriptionTooLong, // 6002

    // ===== Authorization =====
    #[msg("Signer is not the authority of this record")]
    Unauthorized, // 6003

    // ===== Lifecycle =====
    #[msg("Post is already liked by this signer")]
    AlreadyLiked, // 6004

    #[msg("Post is not liked by this signer")]
    NotLiked, // 6005

    #[msg("Account already exists")]
    AlreadyExists, // 6006

    #[msg("Account does not exist")]
    DoesNotExist, // 6007

    // ===== Address integrity =====
    #[msg("Supplied address does not match the derived address")]
    AddressMismatch, // 6008

    // ===== Accounts and codec =====
    #[msg("Required signature is missing")]
    MissingSignature, // 6009

    #[msg("Account discriminator does not match the expected record kind")]
    DiscriminatorMismatch, // 6010

    #[msg("Account data is too small for this record kind")]
    AccountDataTooSmall, // 6011

    #[msg("Record could not be serialized into its reserved space")]
    AccountDidNotSerialize, // 6012

    #[msg("Record could not be deserialized")]
    AccountDidNotDeserialize, // 6013

    #[msg("Funder cannot cover the rent-exempt reservation")]
    InsufficientFunds, // 6014

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow, // 6015

    // ===== Request decoding =====
    #[msg("Invalid instruction data")]
    InvalidInstructionData, // 6016

    #[msg("Not enough account keys supplied")]
    NotEnoughAccountKeys, // 6017

    #[msg("Request targets a different program")]
    IncorrectProgramId, // 6018

    #[msg("No valid bump found for the supplied seeds")]
    AddressDerivationFailed, // 6019

    #[msg("Account is owned by a different program")]
    AccountOwnedByWrongProgram, // 6020
}

/// Custom error code carried by an anchor error, if any
pub fn custom_error_code(err: &Error) -> Option<u32> {
    match err {
        Error::AnchorError(e) => Some(e.error_code_number),
        Error::ProgramError(_) => None,
    }
}

/// Replace `from` with `to`, passing any other error through unchanged
///
/// Handlers use this to surface a generic lifecycle conflict under a more
/// specific name (an occupied like address is `AlreadyLiked`).
pub fn remap_error(err: Error, from: SocialError, to: SocialError) -> Error {
    if custom_error_code(&err) == Some(u32::from(from)) {
        to.into()
    } else {
        err
    }
}

/// Flattened failure returned to callers outside the program
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{name} ({code}): {message}")]
pub struct ProgramFailure {
    pub code: u32,
    pub name: String,
    pub message: String,
}

impl ProgramFailure {
    /// Whether this failure is the given program error
    pub fn is(&self, kind: SocialError) -> bool {
        self.code == u32::from(kind)
    }
}

impl From<&Error> for ProgramFailure {
    fn from(err: &Error) -> Self {
        match err {
            Error::AnchorError(e) => Self {
                code: e.error_code_number,
                name: e.error_name.clone(),
                message: e.error_msg.clone(),
            },
            Error::ProgramError(e) => Self {
                code: 0,
                name: "ProgramError".to_string(),
                message: format!("{:?}", e.program_error),
            },
        }
    }
}

impl From<Error> for ProgramFailure {
    fn from(err: Error) -> Self {
        Self::from(&err)
    }
}

impl From<SocialError> for ProgramFailure {
    fn from(kind: SocialError) -> Self {
        Self::from(Error::from(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_codes_are_stable() {
        assert_eq!(u32::from(SocialError::UsernameTooLong), 6000);
        assert_eq!(u32::from(SocialError::ContentUriTooLong), 6001);
        assert_eq!(u32::from(SocialError::DescriptionTooLong), 6002);
    }

    #[test]
    fn test_remap_only_touches_matching_code() {
        let remapped = remap_error(
            SocialError::AlreadyExists.into(),
            SocialError::AlreadyExists,
            SocialError::AlreadyLiked,
        );
        assert_eq!(custom_error_code(&remapped), Some(u32::from(SocialError::AlreadyLiked)));

        let untouched = remap_error(
            SocialError::InsufficientFunds.into(),
            SocialError::AlreadyExists,
            SocialError::AlreadyLiked,
        );
        assert_eq!(custom_error_code(&untouched), Some(u32::from(SocialError::InsufficientFunds)));
    }

    #[test]
    fn test_program_failure_carries_kind() {
        let failure = ProgramFailure::from(SocialError::NotLiked);
        assert!(failure.is(SocialError::NotLiked));
        assert!(!failure.is(SocialError::AlreadyLiked));
        assert_eq!(failure.name, "NotLiked");
        assert_eq!(failure.message, "Post is not liked by this signer");
    }
}
