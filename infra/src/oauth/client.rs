//! HTTP OAuth client
//!
//! Builds authorization URLs, exchanges codes at the provider's token
//! endpoint and reads the account profile with the resulting access token.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use folio_core::services::oauth::{OAuthClient, OAuthIdentity, OAuthProvider};
use folio_shared::config::{OAuthConfig, OAuthProviderConfig};

use super::profile::{parse_github_emails, parse_identity};
use crate::InfrastructureError;

/// Per-request timeout for provider calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// GitHub lists private addresses separately from the profile
const GITHUB_EMAILS_URL: &str = "https://api.github.com/user/emails";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// reqwest-backed [`OAuthClient`]
pub struct HttpOAuthClient {
    client: reqwest::Client,
    config: OAuthConfig,
}

impl HttpOAuthClient {
    /// Create a new client
    ///
    /// # Errors
    /// * `InfrastructureError::Http` - The HTTP client could not be built
    pub fn new(config: OAuthConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    fn provider(&self, provider: OAuthProvider) -> Option<&OAuthProviderConfig> {
        match provider {
            OAuthProvider::Google => self.config.google.as_ref(),
            OAuthProvider::Github => self.config.github.as_ref(),
        }
    }

    /// Authorization URL for a configured provider
    ///
    /// # Errors
    /// * `InfrastructureError::Config` - Provider missing or its `auth_url` unparsable
    pub fn build_authorize_url(
        &self,
        provider: OAuthProvider,
        state: &str,
    ) -> Result<String, InfrastructureError> {
        let settings = self.provider(provider).ok_or_else(|| {
            InfrastructureError::Config(format!("{} sign-in is not configured", provider))
        })?;
        let redirect_uri = self.config.redirect_url(provider.as_str());
        let scope = settings.scopes.join(" ");

        let url = Url::parse_with_params(
            &settings.auth_url,
            &[
                ("client_id", settings.client_id.as_str()),
                ("redirect_uri", redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", scope.as_str()),
                ("state", state),
            ],
        )
        .map_err(|e| InfrastructureError::Config(format!("Invalid {} auth_url: {}", provider, e)))?;

        Ok(url.to_string())
    }

    async fn exchange_code(
        &self,
        provider: OAuthProvider,
        settings: &OAuthProviderConfig,
        code: &str,
    ) -> Result<String, InfrastructureError> {
        let redirect_uri = self.config.redirect_url(provider.as_str());
        let response = self
            .client
            .post(&settings.token_url)
            .header(ACCEPT, "application/json")
            .form(&[
                ("client_id", settings.client_id.as_str()),
                ("client_secret", settings.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InfrastructureError::OAuth(format!(
                "{} token endpoint returned {}",
                provider, status
            )));
        }

        // GitHub reports a bad code as 200 with an `error` body
        let body: Value = response.json().await?;
        if let Some(error) = body.get("error").and_then(Value::as_str) {
            return Err(InfrastructureError::OAuth(format!(
                "{} rejected the code: {}",
                provider, error
            )));
        }
        let token: TokenResponse = serde_json::from_value(body).map_err(|e| {
            InfrastructureError::OAuth(format!("{} token response unreadable: {}", provider, e))
        })?;

        Ok(token.access_token)
    }

    async fn get_json(&self, url: &str, access_token: &str) -> Result<Value, InfrastructureError> {
        let value = self
            .client
            .get(url)
            .bearer_auth(access_token)
            .header(ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(value)
    }

    async fn identity(
        &self,
        provider: OAuthProvider,
        code: &str,
    ) -> Result<OAuthIdentity, InfrastructureError> {
        let settings = self.provider(provider).ok_or_else(|| {
            InfrastructureError::Config(format!("{} sign-in is not configured", provider))
        })?;

        let access_token = self.exchange_code(provider, settings, code).await?;
        debug!(provider = %provider, "OAuth code exchanged");

        let profile = self.get_json(&settings.userinfo_url, &access_token).await?;
        let mut identity = parse_identity(provider, &profile)?;

        if provider == OAuthProvider::Github && identity.email.is_none() {
            let emails = self.get_json(GITHUB_EMAILS_URL, &access_token).await?;
            identity.email = parse_github_emails(&emails);
        }

        info!(provider = %provider, subject = %identity.subject, "OAuth profile fetched");
        Ok(identity)
    }
}

#[async_trait]
impl OAuthClient for HttpOAuthClient {
    fn authorize_url(&self, provider: OAuthProvider, state: &str) -> Option<String> {
        self.build_authorize_url(provider, state).ok()
    }

    async fn fetch_identity(
        &self,
        provider: OAuthProvider,
        code: &str,
    ) -> Result<OAuthIdentity, String> {
        self.identity(provider, code).await.map_err(|e| e.to_string())
    }
}
