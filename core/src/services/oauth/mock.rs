//! Scripted identity provider for tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::traits::OAuthClient;
use super::types::{OAuthIdentity, OAuthProvider};

/// Provider stub answering from a fixed code table
#[derive(Clone, Default)]
pub struct ScriptedOAuthClient {
    identities: Arc<Mutex<HashMap<String, OAuthIdentity>>>,
    disabled: Vec<OAuthProvider>,
}

impl ScriptedOAuthClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// A client with `provider` unconfigured
    pub fn without(provider: OAuthProvider) -> Self {
        Self {
            disabled: vec![provider],
            ..Self::default()
        }
    }

    /// Answer `code` with `identity`
    pub fn accept(&self, code: &str, identity: OAuthIdentity) {
        if let Ok(mut identities) = self.identities.lock() {
            identities.insert(code.to_string(), identity);
        }
    }
}

#[async_trait]
impl OAuthClient for ScriptedOAuthClient {
    fn authorize_url(&self, provider: OAuthProvider, state: &str) -> Option<String> {
        if self.disabled.contains(&provider) {
            return None;
        }
        Some(format!("https://{}.example/authorize?state={}", provider, state))
    }

    async fn fetch_identity(
        &self,
        provider: OAuthProvider,
        code: &str,
    ) -> Result<OAuthIdentity, String> {
        let identities = self.identities.lock().map_err(|e| e.to_string())?;
        identities
            .get(code)
            .filter(|identity| identity.provider == provider)
            .cloned()
            .ok_or_else(|| "bad_verification_code".to_string())
    }
}
