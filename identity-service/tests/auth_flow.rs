mod common;

use chrono::Duration;
use common::register_command;
use common::username;
use common::TestHarness;
use identity_service::account::errors::AuthError;
use identity_service::account::errors::ConflictField;
use identity_service::account::models::Password;
use identity_service::account::ports::AuthServicePort;

#[tokio::test]
async fn register_then_login_issues_verifiable_token() {
    let harness = TestHarness::new();

    let account = harness
        .service
        .register(register_command("alice", "alice@example.com", "Valid123"))
        .await
        .expect("registration failed");
    assert_eq!(account.username.as_str(), "alice");
    assert!(account.password_hash.starts_with("$argon2"));

    let outcome = harness
        .service
        .login(
            username("alice"),
            Password::new("Valid123".to_string()).unwrap(),
        )
        .await
        .expect("login failed");

    assert_eq!(outcome.account.username.as_str(), "alice");
    assert_eq!(outcome.payload.subject, "alice");
    assert_eq!(
        outcome.payload.expires_at - outcome.payload.issued_at,
        Duration::minutes(15)
    );

    // The issued token round-trips through verification to the same payload
    let verified = harness
        .token_maker
        .verify_token(&outcome.access_token)
        .expect("token verification failed");
    assert_eq!(verified, outcome.payload);
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthenticated() {
    let harness = TestHarness::new();

    harness
        .service
        .register(register_command("alice", "alice@example.com", "Valid123"))
        .await
        .expect("registration failed");

    let result = harness
        .service
        .login(
            username("alice"),
            Password::new("Wrong456".to_string()).unwrap(),
        )
        .await;

    assert!(matches!(result, Err(AuthError::Unauthenticated)));
}

#[tokio::test]
async fn login_with_unknown_username_is_not_found() {
    let harness = TestHarness::new();

    let result = harness
        .service
        .login(
            username("ghost"),
            Password::new("Valid123".to_string()).unwrap(),
        )
        .await;

    assert!(matches!(result, Err(AuthError::NotFound(_))));
}

#[tokio::test]
async fn duplicate_username_and_email_are_attributed() {
    let harness = TestHarness::new();

    harness
        .service
        .register(register_command("alice", "alice@example.com", "Valid123"))
        .await
        .expect("registration failed");

    let same_username = harness
        .service
        .register(register_command("alice", "other@example.com", "Valid123"))
        .await;
    assert!(matches!(
        same_username,
        Err(AuthError::AlreadyExists {
            field: Some(ConflictField::Username)
        })
    ));

    let same_email = harness
        .service
        .register(register_command("bob", "alice@example.com", "Valid123"))
        .await;
    assert!(matches!(
        same_email,
        Err(AuthError::AlreadyExists {
            field: Some(ConflictField::Email)
        })
    ));

    assert_eq!(harness.repository.account_count(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_registrations_have_exactly_one_winner() {
    let harness = TestHarness::new();

    let mut handles = Vec::new();
    for i in 0..4 {
        let service = harness.service.clone();
        handles.push(tokio::spawn(async move {
            service
                .register(register_command(
                    "alice",
                    &format!("alice{i}@example.com"),
                    "Valid123",
                ))
                .await
        }));
    }

    let mut successes = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.expect("task panicked") {
            Ok(_) => successes += 1,
            Err(AuthError::AlreadyExists { .. }) => conflicts += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(conflicts, 3);
    assert_eq!(harness.repository.account_count(), 1);
}

#[tokio::test]
async fn expired_token_fails_verification() {
    let harness = TestHarness::with_token_duration(Duration::seconds(-1));

    harness
        .service
        .register(register_command("alice", "alice@example.com", "Valid123"))
        .await
        .expect("registration failed");

    let outcome = harness
        .service
        .login(
            username("alice"),
            Password::new("Valid123".to_string()).unwrap(),
        )
        .await
        .expect("login failed");

    // The token was born expired; verification must reject it
    let result = harness.token_maker.verify_token(&outcome.access_token);
    assert!(matches!(result, Err(auth::TokenError::Expired)));
}

#[tokio::test]
async fn fresh_token_id_per_login() {
    let harness = TestHarness::new();

    harness
        .service
        .register(register_command("alice", "alice@example.com", "Valid123"))
        .await
        .expect("registration failed");

    let first = harness
        .service
        .login(
            username("alice"),
            Password::new("Valid123".to_string()).unwrap(),
        )
        .await
        .expect("login failed");
    let second = harness
        .service
        .login(
            username("alice"),
            Password::new("Valid123".to_string()).unwrap(),
        )
        .await
        .expect("login failed");

    assert_ne!(first.payload.token_id, second.payload.token_id);
    assert_ne!(first.access_token, second.access_token);
}
