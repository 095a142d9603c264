//! OAuth sign-in handlers
//!
//! `GET /api/auth/signin/{provider}` sends the browser to the provider and
//! remembers the state and return path in a short-lived cookie scoped to
//! `/api/auth`. `GET /api/auth/callback/{provider}` checks that cookie,
//! completes the sign-in and sets the same session cookie a password login
//! does. Failures redirect to the login page with `?error=CODE`.

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use tracing::{info, warn};

use folio_core::services::oauth::OAuthProvider;
use folio_shared::config::SessionConfig;
use folio_shared::errors::error_codes;

use crate::handlers::error::classify;
use crate::handlers::handle_domain_error;
use crate::state::AppState;

use super::session_cookie;

/// Cookie holding the pending sign-in between the two legs
pub const OAUTH_STATE_COOKIE: &str = "folio_oauth_state";

/// Where a completed sign-in lands when no usable `callbackUrl` was given
pub const DEFAULT_CALLBACK: &str = "/admin";

const STATE_COOKIE_PATH: &str = "/api/auth";
const STATE_COOKIE_MINUTES: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct SignInQuery {
    #[serde(rename = "callbackUrl")]
    pub callback_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    /// Set by the provider when the user declined or the request was invalid
    pub error: Option<String>,
}

/// Sign-in started by [`oauth_signin`] and awaiting its callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSignIn {
    pub provider: OAuthProvider,
    pub state: String,
    pub callback: String,
}

impl PendingSignIn {
    pub fn encode(&self) -> String {
        format!(
            "{}:{}:{}",
            self.provider,
            self.state,
            urlencoding::encode(&self.callback)
        )
    }

    pub fn decode(value: &str) -> Option<Self> {
        let mut parts = value.splitn(3, ':');
        let provider = parts.next()?.parse().ok()?;
        let state = parts.next().filter(|s| !s.is_empty())?.to_string();
        let callback = urlencoding::decode(parts.next()?).ok()?;

        Some(Self {
            provider,
            state,
            callback: safe_callback(Some(&callback)),
        })
    }
}

/// Keep only same-site absolute paths; anything else lands on [`DEFAULT_CALLBACK`]
pub fn safe_callback(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_string()
        }
        _ => DEFAULT_CALLBACK.to_string(),
    }
}

fn state_cookie(config: &SessionConfig, pending: &PendingSignIn) -> Cookie<'static> {
    Cookie::build(OAUTH_STATE_COOKIE, pending.encode())
        .path(STATE_COOKIE_PATH)
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure)
        .max_age(CookieDuration::minutes(STATE_COOKIE_MINUTES))
        .finish()
}

fn state_removal_cookie(config: &SessionConfig) -> Cookie<'static> {
    let mut cookie = Cookie::build(OAUTH_STATE_COOKIE, "")
        .path(STATE_COOKIE_PATH)
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure)
        .finish();
    cookie.make_removal();
    cookie
}

/// 302 back to the login page carrying an error code
fn login_error(config: &SessionConfig, code: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((
            header::LOCATION,
            format!("{}?error={}", config.login_path, code),
        ))
        .cookie(state_removal_cookie(config))
        .finish()
}

/// Handler for GET /api/auth/signin/{provider}
///
/// ## Success (302 Found)
/// Redirects to the provider's consent page and sets the state cookie.
///
/// ## Errors
/// - 400 Bad Request: unknown provider name
/// - 404 Not Found: provider not configured
pub async fn oauth_signin(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<SignInQuery>,
) -> HttpResponse {
    let provider = match path.parse::<OAuthProvider>() {
        Ok(provider) => provider,
        Err(error) => return handle_domain_error(&error.into()),
    };

    let start = match state.oauth_service.begin(provider) {
        Ok(start) => start,
        Err(error) => return handle_domain_error(&error),
    };

    let pending = PendingSignIn {
        provider,
        state: start.state,
        callback: safe_callback(query.callback_url.as_deref()),
    };

    HttpResponse::Found()
        .insert_header((header::LOCATION, start.authorize_url))
        .cookie(state_cookie(&state.session_config, &pending))
        .finish()
}

/// Handler for GET /api/auth/callback/{provider}
///
/// ## Success (302 Found)
/// Sets the session cookie and redirects to the `callbackUrl` given at sign-in.
///
/// ## Errors (302 Found to `{login_path}?error=CODE`)
/// - `OAUTH_FAILED`: state mismatch, provider refusal or failed exchange
/// - `ACCOUNT_NOT_LINKED`: the email belongs to an existing password account
pub async fn oauth_callback(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<CallbackQuery>,
) -> HttpResponse {
    let config = &state.session_config;

    let Ok(provider) = path.parse::<OAuthProvider>() else {
        return login_error(config, error_codes::OAUTH_FAILED);
    };

    let pending = req
        .cookie(OAUTH_STATE_COOKIE)
        .and_then(|cookie| PendingSignIn::decode(cookie.value()))
        .filter(|pending| {
            pending.provider == provider && query.state.as_deref() == Some(pending.state.as_str())
        });
    let Some(pending) = pending else {
        warn!(provider = %provider, "OAuth callback with missing or mismatched state");
        return login_error(config, error_codes::OAUTH_FAILED);
    };

    if let Some(error) = query.error.as_deref() {
        info!(provider = %provider, error = %error, "OAuth sign-in declined at provider");
        return login_error(config, error_codes::OAUTH_FAILED);
    }

    let code = query.code.as_deref().unwrap_or_default();
    let session = state
        .oauth_service
        .complete(provider, code)
        .await
        .and_then(|principal| state.session_service.issue(&principal));

    match session {
        Ok(session) => HttpResponse::Found()
            .insert_header((header::LOCATION, pending.callback))
            .cookie(session_cookie(config, session.token))
            .cookie(state_removal_cookie(config))
            .finish(),
        Err(error) => {
            let (status, code) = classify(&error);
            if status.is_server_error() {
                tracing::error!(error = ?error, "OAuth sign-in failed");
            }
            login_error(config, code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_callback() {
        assert_eq!(safe_callback(Some("/admin?tab=projects")), "/admin?tab=projects");
        assert_eq!(safe_callback(None), "/admin");
        assert_eq!(safe_callback(Some("https://evil.example")), "/admin");
        assert_eq!(safe_callback(Some("//evil.example")), "/admin");
        assert_eq!(safe_callback(Some("/\\evil.example")), "/admin");
    }

    #[test]
    fn test_pending_sign_in_cookie_value() {
        let pending = PendingSignIn {
            provider: OAuthProvider::Github,
            state: "abc123".to_string(),
            callback: "/admin?tab=a:b".to_string(),
        };

        let value = pending.encode();
        assert!(!value.contains(';'));
        assert_eq!(PendingSignIn::decode(&value), Some(pending));

        assert!(PendingSignIn::decode("gitlab:abc:%2F").is_none());
        assert!(PendingSignIn::decode("github::%2F").is_none());
        assert!(PendingSignIn::decode("github").is_none());
    }
}
