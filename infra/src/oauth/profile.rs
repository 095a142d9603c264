//! Provider profile payloads to [`OAuthIdentity`]

use serde_json::Value;

use folio_core::services::oauth::{OAuthIdentity, OAuthProvider};

use crate::InfrastructureError;

fn text(profile: &Value, key: &str) -> Option<String> {
    profile
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Read an identity from a userinfo response
///
/// Google answers with OpenID claims; its email is kept only when
/// `email_verified` is set. GitHub answers with the `/user` resource, whose
/// numeric `id` is the subject and `login` the username hint.
///
/// # Errors
/// * `InfrastructureError::OAuth` - The payload carries no account id
pub fn parse_identity(
    provider: OAuthProvider,
    profile: &Value,
) -> Result<OAuthIdentity, InfrastructureError> {
    let missing = || InfrastructureError::OAuth(format!("{} profile has no account id", provider));

    match provider {
        OAuthProvider::Google => {
            let verified = match profile.get("email_verified") {
                Some(Value::Bool(flag)) => *flag,
                Some(Value::String(flag)) => flag == "true",
                _ => false,
            };
            Ok(OAuthIdentity {
                provider,
                subject: text(profile, "sub").ok_or_else(missing)?,
                email: text(profile, "email").filter(|_| verified),
                name: text(profile, "name"),
                username_hint: None,
            })
        }
        OAuthProvider::Github => {
            let subject = match profile.get("id") {
                Some(Value::Number(id)) => id.to_string(),
                Some(Value::String(id)) if !id.is_empty() => id.clone(),
                _ => return Err(missing()),
            };
            Ok(OAuthIdentity {
                provider,
                subject,
                email: text(profile, "email"),
                name: text(profile, "name"),
                username_hint: text(profile, "login"),
            })
        }
    }
}

/// Primary verified address from GitHub's `/user/emails` listing
pub fn parse_github_emails(emails: &Value) -> Option<String> {
    emails
        .as_array()?
        .iter()
        .find(|entry| {
            entry.get("primary").and_then(Value::as_bool) == Some(true)
                && entry.get("verified").and_then(Value::as_bool) == Some(true)
        })
        .and_then(|entry| text(entry, "email"))
}
