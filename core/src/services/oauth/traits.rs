//! Identity provider integration

use async_trait::async_trait;

use super::types::{OAuthIdentity, OAuthProvider};

/// Talks to the external identity providers
#[async_trait]
pub trait OAuthClient: Send + Sync {
    /// Authorization URL to send the browser to, `None` when the provider is not configured
    fn authorize_url(&self, provider: OAuthProvider, state: &str) -> Option<String>;

    /// Exchange an authorization code for the signed-in account's identity
    async fn fetch_identity(
        &self,
        provider: OAuthProvider,
        code: &str,
    ) -> Result<OAuthIdentity, String>;
}
