//! Authentication route handlers
//!
//! - Credential login and logout (session cookie)
//! - Self-registration
//! - Current session lookup
//! - Google and GitHub sign-in
//! - Two-phase password reset

pub mod login;
pub mod logout;
pub mod oauth;
pub mod register;
pub mod reset_password;
pub mod session;
pub mod verify_reset;

pub use login::login;
pub use logout::logout;
pub use oauth::{oauth_callback, oauth_signin};
pub use register::register;
pub use reset_password::reset_password;
pub use session::session;
pub use verify_reset::verify_reset;

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};

use folio_shared::config::SessionConfig;

/// Session cookie carrying a freshly issued token
pub(crate) fn session_cookie(config: &SessionConfig, token: String) -> Cookie<'static> {
    Cookie::build(config.cookie_name.clone(), token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure)
        .max_age(CookieDuration::seconds(config.ttl_seconds))
        .finish()
}

/// Expired cookie that makes the browser drop the session
pub(crate) fn removal_cookie(config: &SessionConfig) -> Cookie<'static> {
    let mut cookie = Cookie::build(config.cookie_name.clone(), "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure)
        .finish();
    cookie.make_removal();
    cookie
}
