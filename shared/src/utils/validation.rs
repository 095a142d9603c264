//! Input validation helpers shared by the services and the HTTP layer

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern")
});

/// Which user field an identifier should be matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierKind {
    Email,
    Username,
}

/// Check whether a string looks like an email address
pub fn is_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value.trim())
}

/// Classify an identifier as an email address or a username
pub fn classify_identifier(identifier: &str) -> IdentifierKind {
    if is_email(identifier) {
        IdentifierKind::Email
    } else {
        IdentifierKind::Username
    }
}

/// Trim a value and drop it when nothing is left
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Check that a string has at least `min` characters (not bytes)
pub fn has_min_chars(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}
