//! Application state shared by every handler

use std::sync::Arc;

use folio_core::services::{
    AuthService, AuthServiceConfig, ContentService, EmailNotifier, OAuthClient, OAuthService,
    PasswordHasher, PasswordResetService, ResetPolicy, SessionService, SessionServiceConfig,
};
use folio_infra::database::{
    DatabasePool, SqliteContentRepository, SqliteUserRepository, SqliteVerificationTokenRepository,
};
use folio_shared::config::{AppConfig, CorsConfig, SessionConfig};

pub type ResetService =
    PasswordResetService<SqliteUserRepository, SqliteVerificationTokenRepository, dyn EmailNotifier>;

pub type SignInService = OAuthService<SqliteUserRepository, dyn OAuthClient>;

/// Services and settings held in `web::Data`
pub struct AppState {
    pub auth_service: Arc<AuthService<SqliteUserRepository>>,
    pub session_service: SessionService,
    pub reset_service: Arc<ResetService>,
    pub oauth_service: Arc<SignInService>,
    pub content_service: Arc<ContentService<SqliteContentRepository>>,
    /// Cookie name, lifetime, secure flag and login path
    pub session_config: SessionConfig,
    pub cors_config: CorsConfig,
    /// Request body limit in bytes
    pub max_payload_size: usize,
    pub database: DatabasePool,
}

impl AppState {
    /// Wire repositories and services over one connection pool
    pub fn new(
        database: DatabasePool,
        config: &AppConfig,
        notifier: Arc<dyn EmailNotifier>,
        oauth_client: Arc<dyn OAuthClient>,
    ) -> Self {
        let pool = database.get_pool().clone();
        let users = Arc::new(SqliteUserRepository::new(pool.clone()));
        let tokens = Arc::new(SqliteVerificationTokenRepository::new(pool.clone()));
        let content = Arc::new(SqliteContentRepository::new(pool));
        let hasher = PasswordHasher::from_config(&config.auth.hashing);

        Self {
            auth_service: Arc::new(AuthService::new(
                users.clone(),
                hasher.clone(),
                AuthServiceConfig::default(),
            )),
            session_service: SessionService::new(SessionServiceConfig::from(&config.auth.session)),
            oauth_service: Arc::new(OAuthService::new(
                users.clone(),
                oauth_client,
                hasher.clone(),
            )),
            reset_service: Arc::new(PasswordResetService::new(
                users,
                tokens,
                notifier,
                hasher,
                ResetPolicy::from(&config.reset),
            )),
            content_service: Arc::new(ContentService::new(content)),
            session_config: config.auth.session.clone(),
            cors_config: config.cors.clone(),
            max_payload_size: config.server.max_payload_size,
            database,
        }
    }
}
