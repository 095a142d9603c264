//! Types for OAuth sign-in

use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

/// Supported identity providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OAuthProvider {
    Google,
    Github,
}

impl OAuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "google",
            OAuthProvider::Github => "github",
        }
    }
}

impl fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OAuthProvider {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(OAuthProvider::Google),
            "github" => Ok(OAuthProvider::Github),
            _ => Err(ValidationError::InvalidFormat {
                field: "provider".to_string(),
            }),
        }
    }
}

/// Account details returned by a provider after a successful exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthIdentity {
    pub provider: OAuthProvider,
    /// Stable account id at the provider
    pub subject: String,
    /// Verified email, if the provider shared one
    pub email: Option<String>,
    pub name: Option<String>,
    /// Provider login name, used to derive a local username
    pub username_hint: Option<String>,
}

/// First leg of a sign-in: where to send the browser and the state to check on return
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthStart {
    pub authorize_url: String,
    pub state: String,
}
