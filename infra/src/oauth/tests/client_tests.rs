//! Authorization URL construction tests

use reqwest::Url;

use folio_core::services::oauth::{OAuthClient, OAuthProvider};
use folio_shared::config::{OAuthConfig, OAuthProviderConfig};

use crate::oauth::HttpOAuthClient;

fn client() -> HttpOAuthClient {
    HttpOAuthClient::new(OAuthConfig {
        github: Some(OAuthProviderConfig::github("gh-client", "gh-secret")),
        public_url: "https://folio.example".to_string(),
        ..OAuthConfig::default()
    })
    .unwrap()
}

#[test]
fn test_github_authorize_url() {
    let url = client()
        .authorize_url(OAuthProvider::Github, "abc123")
        .unwrap();
    let url = Url::parse(&url).unwrap();

    assert_eq!(url.host_str(), Some("github.com"));
    assert_eq!(url.path(), "/login/oauth/authorize");

    let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let get = |key: &str| {
        query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };
    assert_eq!(get("client_id"), Some("gh-client"));
    assert_eq!(
        get("redirect_uri"),
        Some("https://folio.example/api/auth/callback/github")
    );
    assert_eq!(get("response_type"), Some("code"));
    assert_eq!(get("scope"), Some("read:user user:email"));
    assert_eq!(get("state"), Some("abc123"));
    assert!(get("client_secret").is_none());
}

#[test]
fn test_unconfigured_provider_has_no_url() {
    assert!(client().authorize_url(OAuthProvider::Google, "abc123").is_none());
}

#[tokio::test]
async fn test_unconfigured_provider_exchange_fails() {
    let result = client().fetch_identity(OAuthProvider::Google, "code").await;
    assert!(result.unwrap_err().contains("not configured"));
}
