//! Scenario replay
//!
//! A scenario is a JSON list of steps acting on named wallets. Wallet names map
//! to fixed addresses, so the same scenario always touches the same records.
//! A step may name the error it expects; replay reports every step whose
//! outcome differs from its expectation.

use std::collections::BTreeSet;
use std::path::Path;

use anchor_lang::prelude::Pubkey;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use social_ledger::{OperationRequest, ProgramFailure, UserProfile};
use social_sdk::addresses::{post_address, profile_address};
use social_sdk::instructions;
use tracing::{info, warn};

use crate::service::LedgerHandle;

/// Deterministic address for a named scenario wallet
pub fn wallet_address(name: &str) -> Pubkey {
    let hash = Sha256::digest(format!("wallet:{name}").as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    Pubkey::new_from_array(bytes)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Action {
    Initialize,
    RegisterUser {
        user: String,
        username: String,
    },
    CreatePost {
        user: String,
        content_uri: String,
        description: String,
    },
    DeletePost {
        user: String,
        index: u64,
    },
    LikePost {
        user: String,
        author: String,
        index: u64,
    },
    UnlikePost {
        user: String,
        author: String,
        index: u64,
    },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::RegisterUser { .. } => "register_user",
            Self::CreatePost { .. } => "create_post",
            Self::DeletePost { .. } => "delete_post",
            Self::LikePost { .. } => "like_post",
            Self::UnlikePost { .. } => "unlike_post",
        }
    }

    fn wallets(&self) -> Vec<&str> {
        match self {
            Self::Initialize => Vec::new(),
            Self::RegisterUser { user, .. }
            | Self::CreatePost { user, .. }
            | Self::DeletePost { user, .. } => vec![user.as_str()],
            Self::LikePost { user, author, .. } | Self::UnlikePost { user, author, .. } => {
                vec![user.as_str(), author.as_str()]
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    #[serde(flatten)]
    pub action: Action,
    /// Name of the error this step should fail with, e.g. `"AlreadyLiked"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario from {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Invalid scenario in {}", path.display()))
    }

    /// Every wallet name the scenario mentions, sorted
    pub fn wallets(&self) -> BTreeSet<&str> {
        self.steps
            .iter()
            .flat_map(|step| step.action.wallets())
            .collect()
    }

    /// A short walkthrough: register, post, like, unlike, delete
    pub fn demo() -> Self {
        let step = |action| Step {
            action,
            expect_error: None,
        };
        let expecting = |action, error: &str| Step {
            action,
            expect_error: Some(error.to_string()),
        };

        Self {
            steps: vec![
                step(Action::Initialize),
                step(Action::RegisterUser {
                    user: "alice".to_string(),
                    username: "alice".to_string(),
                }),
                step(Action::CreatePost {
                    user: "alice".to_string(),
                    content_uri: "https://example.com/image.jpg".to_string(),
                    description: "My first post!".to_string(),
                }),
                step(Action::LikePost {
                    user: "bob".to_string(),
                    author: "alice".to_string(),
                    index: 0,
                }),
                expecting(
                    Action::LikePost {
                        user: "bob".to_string(),
                        author: "alice".to_string(),
                        index: 0,
                    },
                    "AlreadyLiked",
                ),
                step(Action::UnlikePost {
                    user: "bob".to_string(),
                    author: "alice".to_string(),
                    index: 0,
                }),
                expecting(
                    Action::UnlikePost {
                        user: "bob".to_string(),
                        author: "alice".to_string(),
                        index: 0,
                    },
                    "NotLiked",
                ),
                step(Action::DeletePost {
                    user: "alice".to_string(),
                    index: 0,
                }),
            ],
        }
    }
}

/// What happened to one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub step: usize,
    pub op: &'static str,
    /// `None` on success, otherwise the program failure
    pub failure: Option<ProgramFailure>,
    pub expected_error: Option<String>,
}

impl StepOutcome {
    /// Whether the outcome is what the step asked for
    pub fn as_expected(&self) -> bool {
        match (&self.failure, &self.expected_error) {
            (None, None) => true,
            (Some(failure), Some(expected)) => failure.name == *expected,
            _ => false,
        }
    }
}

/// Replay `scenario` step by step, funding each wallet with `airdrop` first
///
/// Program failures are recorded in the outcomes; only service errors abort.
pub async fn replay(
    handle: &LedgerHandle,
    scenario: &Scenario,
    airdrop: u64,
) -> Result<Vec<StepOutcome>> {
    for name in scenario.wallets() {
        let address = wallet_address(name);
        handle.airdrop(address, airdrop).await?;
        info!(wallet = name, %address, lamports = airdrop, "wallet funded");
    }

    let mut outcomes = Vec::with_capacity(scenario.steps.len());
    for (index, step) in scenario.steps.iter().enumerate() {
        let request = build_request(handle, &step.action).await?;
        let failure = match handle.submit(request).await {
            Ok(_) => None,
            Err(e) => Some(
                e.downcast::<ProgramFailure>()
                    .context("Ledger service failed during replay")?,
            ),
        };

        let outcome = StepOutcome {
            step: index,
            op: step.action.name(),
            failure,
            expected_error: step.expect_error.clone(),
        };
        if outcome.as_expected() {
            let failure = outcome.failure.as_ref().map(|f| f.name.as_str());
            info!(step = index, op = outcome.op, failure = ?failure, "step ok");
        } else {
            warn!(
                step = index,
                op = outcome.op,
                failure = ?outcome.failure,
                expected = ?outcome.expected_error,
                "step diverged"
            );
        }
        outcomes.push(outcome);
    }
    Ok(outcomes)
}

async fn build_request(handle: &LedgerHandle, action: &Action) -> Result<OperationRequest> {
    let request = match action {
        Action::Initialize => instructions::initialize()?,
        Action::RegisterUser { user, username } => {
            instructions::register_user(wallet_address(user), username)?
        }
        Action::CreatePost {
            user,
            content_uri,
            description,
        } => {
            let authority = wallet_address(user);
            // Unregistered authors aim at index 0 and let the program reject them
            let index = handle
                .fetch::<UserProfile>(profile_address(&authority))
                .await?
                .map_or(0, |profile| profile.post_count);
            instructions::create_post(authority, index, content_uri, description)?
        }
        Action::DeletePost { user, index } => {
            let authority = wallet_address(user);
            instructions::delete_post(authority, post_address(&authority, *index))?
        }
        Action::LikePost {
            user,
            author,
            index,
        } => instructions::like_post(
            wallet_address(user),
            post_address(&wallet_address(author), *index),
        )?,
        Action::UnlikePost {
            user,
            author,
            index,
        } => instructions::unlike_post(
            wallet_address(user),
            post_address(&wallet_address(author), *index),
        )?,
    };
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_addresses_are_stable_and_distinct() {
        assert_eq!(wallet_address("alice"), wallet_address("alice"));
        assert_ne!(wallet_address("alice"), wallet_address("bob"));
    }

    #[test]
    fn test_scenario_json_format() {
        let json = r#"{
            "steps": [
                { "op": "register_user", "user": "alice", "username": "alice" },
                { "op": "like_post", "user": "bob", "author": "alice", "index": 0,
                  "expect_error": "DoesNotExist" }
            ]
        }"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();

        assert_eq!(scenario.steps.len(), 2);
        assert_eq!(scenario.steps[1].action.name(), "like_post");
        assert_eq!(scenario.steps[1].expect_error.as_deref(), Some("DoesNotExist"));
        assert_eq!(scenario.wallets().into_iter().collect::<Vec<_>>(), vec!["alice", "bob"]);
    }

    #[test]
    fn test_outcome_expectations() {
        let failure = ProgramFailure::from(social_ledger::SocialError::NotLiked);
        let outcome = |failure: Option<ProgramFailure>, expected: Option<&str>| StepOutcome {
            step: 0,
            op: "unlike_post",
            failure,
            expected_error: expected.map(str::to_string),
        };

        assert!(outcome(None, None).as_expected());
        assert!(outcome(Some(failure.clone()), Some("NotLiked")).as_expected());
        assert!(!outcome(Some(failure.clone()), None).as_expected());
        assert!(!outcome(Some(failure), Some("AlreadyLiked")).as_expected());
        assert!(!outcome(None, Some("NotLiked")).as_expected());
    }
}
