//! Outbound email configuration

use serde::{Deserialize, Serialize};

/// Email delivery provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Resend HTTP API
    Resend,
    /// Log messages instead of sending them (development)
    Console,
}

impl std::str::FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "resend" => Ok(EmailProvider::Resend),
            "console" | "log" | "mock" => Ok(EmailProvider::Console),
            _ => Err(format!("Invalid email provider: {}", s)),
        }
    }
}

/// Email service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Which provider delivers reset codes
    pub provider: EmailProvider,

    /// Provider API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// Sender address
    pub from_address: String,

    /// Provider endpoint
    pub api_url: String,

    /// Public base URL of the site, used for the deep link in emails
    pub public_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::Console,
            api_key: None,
            from_address: String::from("noreply@folio.local"),
            api_url: String::from("https://api.resend.com/emails"),
            public_url: String::from("http://localhost:3000"),
            timeout_secs: 10,
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    ///
    /// A Resend API key switches the provider to Resend unless
    /// `EMAIL_PROVIDER` says otherwise.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let api_key = std::env::var("RESEND_API_KEY").ok().filter(|k| !k.is_empty());
        let provider = std::env::var("EMAIL_PROVIDER")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(if api_key.is_some() {
                EmailProvider::Resend
            } else {
                EmailProvider::Console
            });

        Self {
            provider,
            api_key,
            from_address: std::env::var("RESEND_FROM_EMAIL").unwrap_or(defaults.from_address),
            api_url: defaults.api_url,
            public_url: std::env::var("PUBLIC_URL").unwrap_or(defaults.public_url),
            timeout_secs: defaults.timeout_secs,
        }
    }

    /// Link to the login surface embedded in reset emails
    pub fn login_url(&self) -> String {
        format!("{}/login", self.public_url.trim_end_matches('/'))
    }
}
