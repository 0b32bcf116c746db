// Bounds and authority checks for the social ledger
//
// Every handler runs these before it stages a single write. A string that does
// not fit its declared capacity is rejected here with its own error kind, never
// by a failed write into a fixed-size buffer further down.
use crate::errors::SocialError;
use crate::{MAX_CONTENT_URI_LEN, MAX_DESCRIPTION_LEN, MAX_USERNAME_LEN};
use anchor_lang::prelude::*;

/// Generic byte-length validation
pub fn validate_len(value: &str, max_len: usize, error: SocialError) -> Result<()> {
    if value.len() > max_len {
        return Err(error.into());
    }
    Ok(())
}

/// Validate a profile username
pub fn validate_username(username: &str) -> Result<()> {
    validate_len(username, MAX_USERNAME_LEN, SocialError::UsernameTooLong)
}

/// Validate a post content URI
pub fn validate_content_uri(content_uri: &str) -> Result<()> {
    validate_len(content_uri, MAX_CONTENT_URI_LEN, SocialError::ContentUriTooLong)
}

/// Validate a post description
pub fn validate_description(description: &str) -> Result<()> {
    validate_len(description, MAX_DESCRIPTION_LEN, SocialError::DescriptionTooLong)
}

/// Require `key` to be among the request signers
pub fn require_signer(signers: &[Pubkey], key: &Pubkey) -> Result<()> {
    require!(signers.contains(key), SocialError::MissingSignature);
    Ok(())
}

/// Require the stored authority of a record to be the caller
pub fn require_authority(stored: &Pubkey, caller: &Pubkey) -> Result<()> {
    require_keys_eq!(*stored, *caller, SocialError::Unauthorized);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::custom_error_code;

    fn code(result: Result<()>) -> Option<u32> {
        result.err().as_ref().and_then(custom_error_code)
    }

    #[test]
    fn test_lengths_at_capacity_pass() {
        assert!(validate_username(&"a".repeat(MAX_USERNAME_LEN)).is_ok());
        assert!(validate_content_uri(&"h".repeat(MAX_CONTENT_URI_LEN)).is_ok());
        assert!(validate_description(&"d".repeat(MAX_DESCRIPTION_LEN)).is_ok());
        assert!(validate_username("").is_ok());
    }

    #[test]
    fn test_each_field_has_its_own_error() {
        assert_eq!(
            code(validate_username(&"a".repeat(200))),
            Some(u32::from(SocialError::UsernameTooLong))
        );
        assert_eq!(
            code(validate_content_uri(&"h".repeat(256))),
            Some(u32::from(SocialError::ContentUriTooLong))
        );
        assert_eq!(
            code(validate_description(&"d".repeat(MAX_DESCRIPTION_LEN + 1))),
            Some(u32::from(SocialError::DescriptionTooLong))
        );
    }

    #[test]
    fn test_length_counts_bytes_not_chars() {
        // 11 four-byte characters exceed a 32-byte capacity
        let emoji = "\u{1F600}".repeat(11);
        assert_eq!(emoji.chars().count(), 11);
        assert!(validate_username(&emoji).is_err());
    }

    #[test]
    fn test_signer_and_authority_checks() {
        let caller = Pubkey::new_unique();
        let other = Pubkey::new_unique();

        assert!(require_signer(&[caller], &caller).is_ok());
        assert_eq!(
            code(require_signer(&[other], &caller)),
            Some(u32::from(SocialError::MissingSignature))
        );

        assert!(require_authority(&caller, &caller).is_ok());
        assert_eq!(
            code(require_authority(&other, &caller)),
            Some(u32::from(SocialError::Unauthorized))
        );
    }
}
