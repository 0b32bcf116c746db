//! Display views over ledger records
//!
//! Records on the ledger carry only what the program needs. Views join in the
//! address, the author's username and the viewer's like state for display.

use anchor_lang::prelude::Pubkey;
use serde::{Deserialize, Serialize};
use social_ledger::{Post, UserProfile};

/// A registered profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileView {
    #[serde(with = "pubkey_string")]
    pub address: Pubkey,
    #[serde(with = "pubkey_string")]
    pub authority: Pubkey,
    pub username: String,
    pub post_count: u64,
}

impl ProfileView {
    pub fn new(address: Pubkey, profile: UserProfile) -> Self {
        Self {
            address,
            authority: profile.authority,
            username: profile.username,
            post_count: profile.post_count,
        }
    }
}

/// A live post as seen by one viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostView {
    #[serde(with = "pubkey_string")]
    pub address: Pubkey,
    /// Position in the author's post sequence
    pub index: u64,
    #[serde(with = "pubkey_string")]
    pub author: Pubkey,
    pub author_username: String,
    pub content_uri: String,
    pub description: String,
    pub likes: u64,
    pub created_at: i64,
    /// Whether the viewer holds a like on this post; false without a viewer
    pub liked_by_viewer: bool,
}

impl PostView {
    pub fn new(
        address: Pubkey,
        index: u64,
        post: Post,
        author_username: String,
        liked_by_viewer: bool,
    ) -> Self {
        Self {
            address,
            index,
            author: post.authority,
            author_username,
            content_uri: post.content_uri,
            description: post.description,
            likes: post.likes,
            created_at: post.created_at,
            liked_by_viewer,
        }
    }
}

// Base58 strings for addresses
pub mod pubkey_string {
    use std::str::FromStr;

    use anchor_lang::prelude::Pubkey;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(key: &Pubkey, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(key)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Pubkey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        Pubkey::from_str(&encoded)
            .map_err(|e| serde::de::Error::custom(format!("Invalid address {encoded}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_view_uses_base58_addresses() {
        let authority = Pubkey::new_unique();
        let view = ProfileView {
            address: Pubkey::new_unique(),
            authority,
            username: "alice".to_string(),
            post_count: 2,
        };

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["authority"], authority.to_string());
        assert_eq!(json["post_count"], 2);

        let back: ProfileView = serde_json::from_value(json).unwrap();
        assert_eq!(back, view);
    }

    #[test]
    fn test_invalid_address_is_rejected() {
        let json = r#"{"address":"not-base58!","authority":"11111111111111111111111111111111","username":"a","post_count":0}"#;
        assert!(serde_json::from_str::<ProfileView>(json).is_err());
    }
}
