//! Shared fixtures for the API integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::test::TestRequest;
use actix_web::web;
use async_trait::async_trait;
use serde_json::json;

use folio_api::AppState;
use folio_core::services::oauth::{OAuthClient, OAuthIdentity, OAuthProvider};
use folio_core::services::{EmailNotifier, PasswordHasher};
use folio_infra::database::{DatabasePool, SqliteUserRepository};
use folio_infra::seed::{seed_editor, SeedUser};
use folio_shared::config::{AppConfig, HashingConfig};

pub const EDITOR_USERNAME: &str = "owner";
pub const EDITOR_PASSWORD: &str = "owner-pass";
pub const SESSION_COOKIE: &str = "folio_session";

/// A reset code handed to the notifier
#[derive(Debug, Clone)]
pub struct SentCode {
    pub to: String,
    pub code: String,
    pub display_name: String,
}

/// Notifier that keeps every message in memory
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<SentCode>>,
    delay: Option<Duration>,
}

impl RecordingNotifier {
    /// A notifier that stalls for `delay` before accepting each message
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<SentCode> {
        self.sent.lock().unwrap().clone()
    }

    /// Wait up to a second for `count` messages; delivery runs in the background
    pub async fn wait_for(&self, count: usize) -> Vec<SentCode> {
        for _ in 0..200 {
            let sent = self.sent();
            if sent.len() >= count {
                return sent;
            }
            actix_web::rt::time::sleep(Duration::from_millis(5)).await;
        }
        self.sent()
    }

    pub async fn last_code_for(&self, to: &str) -> Option<String> {
        self.wait_for(1)
            .await
            .into_iter()
            .rev()
            .find(|message| message.to == to)
            .map(|message| message.code)
    }
}

#[async_trait]
impl EmailNotifier for RecordingNotifier {
    async fn send_reset_code(&self, to: &str, code: &str, display_name: &str) -> Result<String, String> {
        if let Some(delay) = self.delay {
            actix_web::rt::time::sleep(delay).await;
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(SentCode {
            to: to.to_string(),
            code: code.to_string(),
            display_name: display_name.to_string(),
        });
        Ok(format!("test-{}", sent.len()))
    }
}

/// Identity provider stand-in: GitHub is configured, Google is not
#[derive(Default)]
pub struct StubOAuthClient {
    identities: Mutex<HashMap<String, OAuthIdentity>>,
}

impl StubOAuthClient {
    /// Answer `code` with a GitHub identity
    pub fn accept_github(&self, code: &str, subject: &str, login: &str, email: Option<&str>) {
        self.identities.lock().unwrap().insert(
            code.to_string(),
            OAuthIdentity {
                provider: OAuthProvider::Github,
                subject: subject.to_string(),
                email: email.map(str::to_string),
                name: None,
                username_hint: Some(login.to_string()),
            },
        );
    }
}

#[async_trait]
impl OAuthClient for StubOAuthClient {
    fn authorize_url(&self, provider: OAuthProvider, state: &str) -> Option<String> {
        (provider == OAuthProvider::Github)
            .then(|| format!("https://github.example/login/oauth/authorize?state={}", state))
    }

    async fn fetch_identity(
        &self,
        provider: OAuthProvider,
        code: &str,
    ) -> Result<OAuthIdentity, String> {
        self.identities
            .lock()
            .unwrap()
            .get(code)
            .filter(|identity| identity.provider == provider)
            .cloned()
            .ok_or_else(|| "bad_verification_code".to_string())
    }
}

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub notifier: Arc<RecordingNotifier>,
    pub oauth: Arc<StubOAuthClient>,
}

/// In-memory store with the schema applied and an editor account seeded
pub async fn setup() -> TestContext {
    setup_with(RecordingNotifier::default()).await
}

/// [`setup`] with a specific notifier
pub async fn setup_with(notifier: RecordingNotifier) -> TestContext {
    let database = DatabasePool::in_memory().await.expect("in-memory database");
    database.run_migrations().await.expect("schema");

    let mut config = AppConfig::default();
    config.auth.hashing.cost = HashingConfig::MIN_COST;

    let users = SqliteUserRepository::new(database.get_pool().clone());
    seed_editor(
        &users,
        &PasswordHasher::from_config(&config.auth.hashing),
        SeedUser {
            username: EDITOR_USERNAME.to_string(),
            password: EDITOR_PASSWORD.to_string(),
            email: Some("owner@example.com".to_string()),
            name: Some("Owner".to_string()),
        },
    )
    .await
    .expect("seed editor");

    let notifier = Arc::new(notifier);
    let oauth = Arc::new(StubOAuthClient::default());
    let state = web::Data::new(AppState::new(
        database,
        &config,
        notifier.clone(),
        oauth.clone(),
    ));

    TestContext {
        state,
        notifier,
        oauth,
    }
}

pub fn register_request(username: &str, password: &str, email: Option<&str>) -> TestRequest {
    TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "username": username, "password": password, "email": email }))
}

pub fn login_request(identifier: &str, password: &str) -> TestRequest {
    TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "identifier": identifier, "password": password }))
}

/// The session cookie set on a response
pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(|cookie| cookie.into_owned())
}
