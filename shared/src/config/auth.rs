//! Authentication configuration: session tokens, password hashing and OAuth sign-in

use serde::{Deserialize, Serialize};

/// Placeholder secret used when none is configured
pub const DEFAULT_SESSION_SECRET: &str = "development-secret-please-change-in-production";

/// Session token and cookie configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Secret key for signing session tokens (HS256)
    pub secret: String,

    /// Session lifetime in seconds
    pub ttl_seconds: i64,

    /// Token issuer claim
    pub issuer: String,

    /// Session cookie name
    pub cookie_name: String,

    /// Session cookie secure flag (HTTPS only)
    pub secure: bool,

    /// Path of the login surface unauthenticated visitors are redirected to
    #[serde(default = "default_login_path")]
    pub login_path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SESSION_SECRET),
            ttl_seconds: 7 * 24 * 3600,
            issuer: String::from("folio"),
            cookie_name: String::from("folio_session"),
            secure: false,
            login_path: default_login_path(),
        }
    }
}

impl SessionConfig {
    /// Create a new session configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set session lifetime in hours
    pub fn with_ttl_hours(mut self, hours: i64) -> Self {
        self.ttl_seconds = hours * 3600;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SESSION_SECRET
    }
}

/// Password hashing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HashingConfig {
    /// bcrypt cost factor
    pub cost: u32,
}

impl HashingConfig {
    /// Lowest cost bcrypt accepts
    pub const MIN_COST: u32 = 4;

    /// Default cost, roughly 100ms per hash on commodity hardware
    pub const DEFAULT_COST: u32 = 10;
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            cost: Self::DEFAULT_COST,
        }
    }
}

/// OAuth 2.0 authorization-code settings for one identity provider
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OAuthProviderConfig {
    pub client_id: String,
    pub client_secret: String,
    pub auth_url: String,
    pub token_url: String,
    /// Endpoint returning the signed-in account's profile
    pub userinfo_url: String,
    pub scopes: Vec<String>,
}

impl OAuthProviderConfig {
    /// Google endpoints with the `openid email profile` scopes
    pub fn google(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            auth_url: String::from("https://accounts.google.com/o/oauth2/v2/auth"),
            token_url: String::from("https://oauth2.googleapis.com/token"),
            userinfo_url: String::from("https://openidconnect.googleapis.com/v1/userinfo"),
            scopes: vec!["openid".into(), "email".into(), "profile".into()],
        }
    }

    /// GitHub endpoints with the `read:user user:email` scopes
    pub fn github(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            auth_url: String::from("https://github.com/login/oauth/authorize"),
            token_url: String::from("https://github.com/login/oauth/access_token"),
            userinfo_url: String::from("https://api.github.com/user"),
            scopes: vec!["read:user".into(), "user:email".into()],
        }
    }

    fn from_env(id_var: &str, secret_var: &str, build: fn(String, String) -> Self) -> Option<Self> {
        let id = std::env::var(id_var).ok().filter(|v| !v.trim().is_empty())?;
        let secret = std::env::var(secret_var).ok().filter(|v| !v.trim().is_empty())?;
        Some(build(id, secret))
    }
}

/// OAuth sign-in providers; an absent provider is disabled
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OAuthConfig {
    #[serde(default)]
    pub google: Option<OAuthProviderConfig>,

    #[serde(default)]
    pub github: Option<OAuthProviderConfig>,

    /// Public base URL the providers redirect back to
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            google: None,
            github: None,
            public_url: default_public_url(),
        }
    }
}

impl OAuthConfig {
    /// Read `GOOGLE_ID`/`GOOGLE_SECRET`, `GITHUB_ID`/`GITHUB_SECRET` and
    /// `NEXTAUTH_URL` (or `PUBLIC_URL`)
    pub fn from_env() -> Self {
        let public_url = ["NEXTAUTH_URL", "PUBLIC_URL"]
            .iter()
            .find_map(|key| std::env::var(key).ok().filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(default_public_url);

        Self {
            google: OAuthProviderConfig::from_env(
                "GOOGLE_ID",
                "GOOGLE_SECRET",
                OAuthProviderConfig::google,
            ),
            github: OAuthProviderConfig::from_env(
                "GITHUB_ID",
                "GITHUB_SECRET",
                OAuthProviderConfig::github,
            ),
            public_url,
        }
    }

    /// Callback URL registered with a provider, `{public_url}/api/auth/callback/{provider}`
    pub fn redirect_url(&self, provider: &str) -> String {
        format!(
            "{}/api/auth/callback/{}",
            self.public_url.trim_end_matches('/'),
            provider
        )
    }

    pub fn is_enabled(&self) -> bool {
        self.google.is_some() || self.github.is_some()
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Session configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Password hashing configuration
    #[serde(default)]
    pub hashing: HashingConfig,

    /// OAuth sign-in providers
    #[serde(default)]
    pub oauth: OAuthConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env(secure_cookie: bool) -> Self {
        let defaults = SessionConfig::default();
        let session = SessionConfig {
            secret: std::env::var("SESSION_SECRET").unwrap_or(defaults.secret),
            ttl_seconds: std::env::var("SESSION_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.ttl_seconds),
            issuer: defaults.issuer,
            cookie_name: std::env::var("SESSION_COOKIE_NAME").unwrap_or(defaults.cookie_name),
            secure: std::env::var("SESSION_COOKIE_SECURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(secure_cookie),
            login_path: defaults.login_path,
        };
        let hashing = HashingConfig {
            cost: std::env::var("BCRYPT_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(HashingConfig::DEFAULT_COST),
        };

        Self {
            session,
            hashing,
            oauth: OAuthConfig::from_env(),
        }
    }
}

fn default_login_path() -> String {
    String::from("/login")
}

fn default_public_url() -> String {
    String::from("http://localhost:3000")
}
