use anchor_lang::prelude::*;
use social_ledger::pda::{find_like_address, find_post_address, find_user_profile_address};
use social_ledger::{
    AccountStore, CreatePost, DeletePost, LedgerRecord, LikePost, OperationRequest, Post,
    RegisterUser, SocialError, SocialInstruction, StoredAccount,
};

mod common;
use common::*;

const IMAGE_URI: &str = "https://example.com/image.jpg";

#[test]
fn test_delete_by_non_authority_is_unauthorized() {
    let mut context = TestLedger::new();
    let alice = context.registered_user("alice");
    let mallory = context.registered_user("mallory");
    let post = context.create_post(alice, IMAGE_URI, "mine").unwrap();
    let before = context.snapshot();

    assert_fails_with(context.delete_post(mallory, post), SocialError::Unauthorized);
    assert_eq!(context.snapshot(), before);
    assert!(context.post(&post).is_some());
}

#[test]
fn test_delete_with_foreign_profile_is_unauthorized() {
    let mut context = TestLedger::new();
    let alice = context.registered_user("alice");
    let mallory = context.registered_user("mallory");
    let alices_post = context.create_post(alice, IMAGE_URI, "mine").unwrap();
    let mallorys_post = context.create_post(mallory, IMAGE_URI, "also mine").unwrap();
    let (alice_profile, _) = find_user_profile_address(&alice);
    let before = context.snapshot();

    for post in [alices_post, mallorys_post] {
        let result = context.submit(
            &DeletePost {
                post,
                user_profile: alice_profile,
                authority: mallory,
            },
            SocialInstruction::DeletePost,
            mallory,
        );
        assert_fails_with(result, SocialError::Unauthorized);
    }
    assert_eq!(context.snapshot(), before);
}

#[test]
fn test_post_with_foreign_profile_is_unauthorized() {
    let mut context = TestLedger::new();
    let alice = context.registered_user("alice");
    let mallory = context.funded_user();
    let (alice_profile, _) = find_user_profile_address(&alice);
    let (mallory_post, _) = find_post_address(&mallory, 0);
    let before = context.snapshot();

    let result = context.submit(
        &CreatePost {
            post: mallory_post,
            user_profile: alice_profile,
            authority: mallory,
        },
        SocialInstruction::CreatePost {
            content_uri: IMAGE_URI.to_string(),
            description: "not my profile".to_string(),
        },
        mallory,
    );
    assert_fails_with(result, SocialError::Unauthorized);
    assert_eq!(context.snapshot(), before);
    assert_eq!(context.profile(&alice).unwrap().post_count, 0);
}

#[test]
fn test_register_at_substituted_address_is_rejected() {
    let mut context = TestLedger::new();
    let alice = context.funded_user();
    let (someone_elses, _) = find_user_profile_address(&Pubkey::new_unique());

    let result = context.submit(
        &RegisterUser {
            user_profile: someone_elses,
            authority: alice,
        },
        SocialInstruction::RegisterUser {
            username: "alice".to_string(),
        },
        alice,
    );
    assert_fails_with(result, SocialError::AddressMismatch);
    assert!(context.ledger.account(&someone_elses).is_none());
}

#[test]
fn test_post_at_skipped_index_is_rejected() {
    let mut context = TestLedger::new();
    let alice = context.registered_user("alice");
    let (user_profile, _) = find_user_profile_address(&alice);
    let (future_post, _) = find_post_address(&alice, 5);

    let result = context.submit(
        &CreatePost {
            post: future_post,
            user_profile,
            authority: alice,
        },
        SocialInstruction::CreatePost {
            content_uri: IMAGE_URI.to_string(),
            description: "skipping ahead".to_string(),
        },
        alice,
    );
    assert_fails_with(result, SocialError::AddressMismatch);
    assert_eq!(context.profile(&alice).unwrap().post_count, 0);
}

#[test]
fn test_like_at_another_likers_address_is_rejected() {
    let mut context = TestLedger::new();
    let alice = context.registered_user("alice");
    let post = context.create_post(alice, IMAGE_URI, "hi").unwrap();
    let fan = context.funded_user();
    let (alices_like, _) = find_like_address(&post, &alice);

    let result = context.submit(
        &LikePost {
            like: alices_like,
            post,
            authority: fan,
        },
        SocialInstruction::LikePost,
        fan,
    );
    assert_fails_with(result, SocialError::AddressMismatch);
    assert_eq!(context.post(&post).unwrap().likes, 0);
}

#[test]
fn test_acting_for_someone_else_requires_their_signature() {
    let mut context = TestLedger::new();
    let alice = context.registered_user("alice");
    let post = context.create_post(alice, IMAGE_URI, "hi").unwrap();
    let mallory = context.funded_user();
    let (like, _) = find_like_address(&post, &alice);

    let result = context.submit(
        &LikePost {
            like,
            post,
            authority: alice,
        },
        SocialInstruction::LikePost,
        mallory,
    );
    assert_fails_with(result, SocialError::MissingSignature);
}

#[test]
fn test_like_on_non_post_record_is_rejected() {
    let mut context = TestLedger::new();
    let alice = context.registered_user("alice");
    let fan = context.funded_user();
    let (profile, _) = find_user_profile_address(&alice);

    // A profile address passed where a post is expected
    assert_fails_with(context.like(fan, profile), SocialError::DiscriminatorMismatch);
}

#[test]
fn test_post_owned_by_other_program_is_rejected() {
    let mut context = TestLedger::new();
    let alice = context.registered_user("alice");
    let fan = context.funded_user();

    let forged = Pubkey::new_unique();
    let post = Post {
        authority: alice,
        content_uri: IMAGE_URI.to_string(),
        description: "forged".to_string(),
        likes: 0,
        created_at: 0,
    };
    context.ledger.save(
        forged,
        StoredAccount {
            lamports: 1_000_000,
            data: post.encode().unwrap(),
            owner: Pubkey::new_unique(),
        },
    );

    assert_fails_with(context.like(fan, forged), SocialError::AccountOwnedByWrongProgram);
    assert_fails_with(context.delete_post(alice, forged), SocialError::AccountOwnedByWrongProgram);
}

#[test]
fn test_malformed_requests_are_rejected() {
    let mut context = TestLedger::new();
    let alice = context.funded_user();
    let (user_profile, _) = find_user_profile_address(&alice);
    let accounts = RegisterUser {
        user_profile,
        authority: alice,
    };
    let instruction = SocialInstruction::RegisterUser {
        username: "alice".to_string(),
    };

    let mut garbage = OperationRequest::new(&accounts, &instruction, vec![alice]).unwrap();
    garbage.data = vec![0xde, 0xad, 0xbe, 0xef, 0, 0, 0, 0, 1];
    assert_fails_with(context.ledger.process(&garbage), SocialError::InvalidInstructionData);

    let mut short = OperationRequest::new(&accounts, &instruction, vec![alice]).unwrap();
    short.accounts.pop();
    assert_fails_with(context.ledger.process(&short), SocialError::NotEnoughAccountKeys);

    let mut elsewhere = OperationRequest::new(&accounts, &instruction, vec![alice]).unwrap();
    elsewhere.program_id = Pubkey::new_unique();
    assert_fails_with(context.ledger.process(&elsewhere), SocialError::IncorrectProgramId);

    assert!(context.profile(&alice).is_none());
}

#[test]
fn test_error_codes_reach_the_caller() {
    let mut context = TestLedger::new();
    let user = context.funded_user();

    let failure = context.register_user(user, &"x".repeat(200)).unwrap_err();
    assert_eq!(failure.code, 6000);
    assert_eq!(failure.name, "UsernameTooLong");

    let alice = context.registered_user("alice");
    let failure = context
        .create_post(alice, &"h".repeat(256), "")
        .unwrap_err();
    assert_eq!(failure.code, 6001);
}
