//! Integration tests for the SQLite repositories against an in-memory database

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::json;

use folio_core::domain::entities::content::{ContentItem, ContentKind, ContentPayload};
use folio_core::domain::entities::user::{Role, User};
use folio_core::domain::entities::verification_token::VerificationToken;
use folio_core::errors::{AuthError, DomainError};
use folio_core::repositories::{ContentRepository, UserRepository, VerificationTokenRepository};
use folio_core::services::password::PasswordHasher;
use folio_core::services::reset::{
    EmailNotifier, PasswordResetService, ResetPolicy, VerifyResetCommand,
};
use folio_infra::database::{
    DatabasePool, SqliteContentRepository, SqliteUserRepository, SqliteVerificationTokenRepository,
};
use folio_infra::seed::{seed_editor, SeedOutcome, SeedUser};

async fn pool() -> DatabasePool {
    let pool = DatabasePool::in_memory().await.unwrap();
    pool.run_migrations().await.unwrap();
    pool
}

fn user(username: &str, email: Option<&str>) -> User {
    User::register(
        username.to_string(),
        email.map(str::to_string),
        "$2b$04$placeholderdigest".to_string(),
        None,
    )
}

#[derive(Default)]
struct CapturingNotifier {
    codes: Mutex<Vec<String>>,
}

impl CapturingNotifier {
    /// Delivery is spawned by the service, so poll until the first code lands
    async fn first_code(&self) -> String {
        for _ in 0..200 {
            if let Some(code) = self.codes.lock().unwrap().first().cloned() {
                return code;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        panic!("no reset code was delivered");
    }
}

#[async_trait]
impl EmailNotifier for CapturingNotifier {
    async fn send_reset_code(&self, _to: &str, code: &str, _name: &str) -> Result<String, String> {
        self.codes.lock().unwrap().push(code.to_string());
        Ok("captured".to_string())
    }
}

#[tokio::test]
async fn test_user_round_trip_and_lookups() {
    let pool = pool().await;
    let repo = SqliteUserRepository::new(pool.get_pool().clone());

    let created = repo.create(user("alice", Some("alice@example.com"))).await.unwrap();

    let by_name = repo.find_by_username("alice").await.unwrap().unwrap();
    assert_eq!(by_name.id, created.id);
    assert_eq!(by_name.role, Role::Viewer);
    assert_eq!(by_name.email.as_deref(), Some("alice@example.com"));

    let by_email = repo.find_by_email("alice@example.com").await.unwrap().unwrap();
    assert_eq!(by_email.id, created.id);
    assert!(repo.find_by_id(created.id).await.unwrap().is_some());
    assert!(repo.find_by_username("ALICE").await.unwrap().is_none());
}

#[tokio::test]
async fn test_unique_username_and_email() {
    let pool = pool().await;
    let repo = SqliteUserRepository::new(pool.get_pool().clone());
    repo.create(user("alice", Some("alice@example.com"))).await.unwrap();

    let same_name = repo.create(user("alice", None)).await;
    assert!(matches!(same_name, Err(DomainError::Auth(AuthError::Conflict))));

    let same_email = repo.create(user("alice2", Some("alice@example.com"))).await;
    assert!(matches!(same_email, Err(DomainError::Auth(AuthError::Conflict))));

    // Absent emails never collide
    repo.create(user("bob", None)).await.unwrap();
    repo.create(user("carol", None)).await.unwrap();
    assert_eq!(repo.count().await.unwrap(), 3);

    assert!(repo.exists_by_username_or_email("alice", None).await.unwrap());
    assert!(repo
        .exists_by_username_or_email("nobody", Some("alice@example.com"))
        .await
        .unwrap());
    assert!(!repo.exists_by_username_or_email("nobody", None).await.unwrap());
}

#[tokio::test]
async fn test_oauth_account_link() {
    let pool = pool().await;
    let repo = SqliteUserRepository::new(pool.get_pool().clone());

    let created = repo
        .create_with_oauth_account(user("octocat", Some("octo@example.com")), "github", "583231")
        .await
        .unwrap();

    let linked = repo.find_by_oauth_account("github", "583231").await.unwrap().unwrap();
    assert_eq!(linked.id, created.id);
    assert_eq!(linked.role, Role::Viewer);
    assert!(repo.find_by_oauth_account("google", "583231").await.unwrap().is_none());

    // A second link for the same identity rolls back its user insert
    let again = repo
        .create_with_oauth_account(user("octocat-2", None), "github", "583231")
        .await;
    assert!(matches!(again, Err(DomainError::Auth(AuthError::Conflict))));
    assert!(repo.find_by_username("octocat-2").await.unwrap().is_none());
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_update_password() {
    let pool = pool().await;
    let repo = SqliteUserRepository::new(pool.get_pool().clone());
    let created = repo.create(user("alice", None)).await.unwrap();

    assert!(repo.update_password(created.id, "$2b$04$newdigest").await.unwrap());
    let stored = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(stored.password_hash, "$2b$04$newdigest");

    assert!(!repo.update_password(uuid::Uuid::new_v4(), "x").await.unwrap());
}

#[tokio::test]
async fn test_token_store_matches_exact_pair() {
    let pool = pool().await;
    let repo = SqliteVerificationTokenRepository::new(pool.get_pool().clone());

    let token = repo
        .create(VerificationToken::issue_default("alice@example.com"))
        .await
        .unwrap();

    let found = repo.find("alice@example.com", &token.token).await.unwrap().unwrap();
    assert_eq!(found.token, token.token);
    assert_eq!(found.expires.timestamp(), token.expires.timestamp());
    assert!(repo.find("bob@example.com", &token.token).await.unwrap().is_none());

    assert!(repo.delete("alice@example.com", &token.token).await.unwrap());
    assert!(!repo.delete("alice@example.com", &token.token).await.unwrap());
}

#[tokio::test]
async fn test_same_pair_can_be_stored_twice() {
    let pool = pool().await;
    let repo = SqliteVerificationTokenRepository::new(pool.get_pool().clone());
    let token = VerificationToken {
        identifier: "alice@example.com".to_string(),
        token: "123456".to_string(),
        expires: Utc::now() + Duration::hours(1),
    };

    repo.create(token.clone()).await.unwrap();
    repo.create(token.clone()).await.unwrap();
    assert_eq!(repo.count_for_identifier("alice@example.com").await.unwrap(), 2);

    assert!(repo.find("alice@example.com", "123456").await.unwrap().is_some());
    assert!(repo.delete("alice@example.com", "123456").await.unwrap());
    assert!(repo.find("alice@example.com", "123456").await.unwrap().is_none());
}

#[tokio::test]
async fn test_redeem_updates_password_and_consumes_code() {
    let pool = pool().await;
    let users = SqliteUserRepository::new(pool.get_pool().clone());
    let tokens = SqliteVerificationTokenRepository::new(pool.get_pool().clone());
    let alice = users.create(user("alice", Some("alice@example.com"))).await.unwrap();
    let token = tokens
        .create(VerificationToken::issue_default("alice@example.com"))
        .await
        .unwrap();

    assert!(tokens
        .redeem("alice@example.com", &token.token, alice.id, "$2b$04$newdigest")
        .await
        .unwrap());
    let stored = users.find_by_id(alice.id).await.unwrap().unwrap();
    assert_eq!(stored.password_hash, "$2b$04$newdigest");

    assert!(!tokens
        .redeem("alice@example.com", &token.token, alice.id, "$2b$04$again")
        .await
        .unwrap());
    let stored = users.find_by_id(alice.id).await.unwrap().unwrap();
    assert_eq!(stored.password_hash, "$2b$04$newdigest");
}

#[tokio::test]
async fn test_redeem_rolls_back_when_user_missing() {
    let pool = pool().await;
    let tokens = SqliteVerificationTokenRepository::new(pool.get_pool().clone());
    let token = tokens
        .create(VerificationToken::issue_default("ghost@example.com"))
        .await
        .unwrap();

    let result = tokens
        .redeem("ghost@example.com", &token.token, uuid::Uuid::new_v4(), "$2b$04$digest")
        .await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::UserNotFound))));
    assert!(tokens
        .find("ghost@example.com", &token.token)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_delete_for_identifier() {
    let pool = pool().await;
    let repo = SqliteVerificationTokenRepository::new(pool.get_pool().clone());

    for code in ["111111", "222222"] {
        repo.create(VerificationToken {
            identifier: "alice@example.com".to_string(),
            token: code.to_string(),
            expires: Utc::now() + Duration::hours(1),
        })
        .await
        .unwrap();
    }
    repo.create(VerificationToken::issue_default("bob@example.com"))
        .await
        .unwrap();

    assert_eq!(repo.count_for_identifier("alice@example.com").await.unwrap(), 2);
    assert_eq!(repo.delete_for_identifier("alice@example.com").await.unwrap(), 2);
    assert_eq!(repo.count_for_identifier("alice@example.com").await.unwrap(), 0);
    assert_eq!(repo.count_for_identifier("bob@example.com").await.unwrap(), 1);
}

#[tokio::test]
async fn test_content_crud() {
    let pool = pool().await;
    let repo = SqliteContentRepository::new(pool.get_pool().clone());

    let first = ContentItem::new(
        ContentPayload::from_json(ContentKind::Projects, json!({"title": "One", "desc": "d"}))
            .unwrap(),
    );
    let second = ContentItem::new(
        ContentPayload::from_json(
            ContentKind::Projects,
            json!({"title": "Two", "desc": "d", "tags": ["rust", "sqlx"]}),
        )
        .unwrap(),
    );
    repo.create(first.clone()).await.unwrap();
    repo.create(second.clone()).await.unwrap();

    let listed = repo.list(ContentKind::Projects).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[0].payload, second.payload);
    assert!(repo.list(ContentKind::Certificates).await.unwrap().is_empty());

    assert!(repo.find(ContentKind::Experience, first.id).await.unwrap().is_none());

    let mut edited = first.clone();
    edited.replace_payload(
        ContentPayload::from_json(ContentKind::Projects, json!({"title": "Uno", "desc": "d"}))
            .unwrap(),
    );
    repo.update(edited.clone()).await.unwrap();
    let stored = repo.find(ContentKind::Projects, first.id).await.unwrap().unwrap();
    assert_eq!(stored.payload, edited.payload);

    assert!(repo.delete(ContentKind::Projects, first.id).await.unwrap());
    assert!(!repo.delete(ContentKind::Projects, first.id).await.unwrap());

    let missing = repo.update(first).await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_seed_editor_is_idempotent() {
    let pool = pool().await;
    let repo = SqliteUserRepository::new(pool.get_pool().clone());
    let hasher = PasswordHasher::new(4);
    let seed = SeedUser {
        username: "owner".to_string(),
        password: "keepgoing".to_string(),
        email: Some("owner@example.com".to_string()),
        name: Some("Owner".to_string()),
    };

    let first = seed_editor(&repo, &hasher, seed.clone()).await.unwrap();
    assert_eq!(first, SeedOutcome::Created);

    let second = seed_editor(
        &repo,
        &hasher,
        SeedUser {
            password: "changed1".to_string(),
            ..seed
        },
    )
    .await
    .unwrap();
    assert_eq!(second, SeedOutcome::AlreadyPresent);

    let owner = repo.find_by_username("owner").await.unwrap().unwrap();
    assert_eq!(owner.role, Role::Editor);
    assert!(hasher.verify("keepgoing", &owner.password_hash));
}

#[tokio::test]
async fn test_concurrent_verification_consumes_code_once() {
    let pool = pool().await;
    let users = Arc::new(SqliteUserRepository::new(pool.get_pool().clone()));
    let tokens = Arc::new(SqliteVerificationTokenRepository::new(pool.get_pool().clone()));
    let notifier = Arc::new(CapturingNotifier::default());
    let hasher = PasswordHasher::new(4);

    users
        .create(User::register(
            "alice".to_string(),
            Some("alice@example.com".to_string()),
            hasher.hash("secret1").unwrap(),
            None,
        ))
        .await
        .unwrap();

    let service = Arc::new(PasswordResetService::new(
        users,
        tokens,
        notifier.clone(),
        hasher,
        ResetPolicy::default(),
    ));
    service.request_reset("alice").await.unwrap();
    let code = notifier.first_code().await;

    let attempt = |password: &str| {
        let service = service.clone();
        let command = VerifyResetCommand {
            email: "alice@example.com".to_string(),
            code: code.clone(),
            new_password: password.to_string(),
        };
        tokio::spawn(async move { service.verify_reset(command).await })
    };

    let first = attempt("secret2");
    let second = attempt("secret3");
    let results = [first.await.unwrap(), second.await.unwrap()];

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| matches!(e, DomainError::Auth(AuthError::InvalidCode))));
}
