//! Authentication request and response bodies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use folio_core::domain::entities::user::{PublicUser, Role};
use folio_core::domain::value_objects::SessionPrincipal;

/// Body of `POST /api/auth/login`
///
/// The identifier may arrive under any of its historical field names.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(
        default,
        alias = "usernameOrIdentifier",
        alias = "username",
        alias = "email"
    )]
    #[validate(length(max = 254))]
    pub identifier: Option<String>,

    /// bcrypt reads at most 72 bytes
    #[serde(default)]
    #[validate(length(max = 72))]
    pub password: Option<String>,
}

/// Body of `POST /api/auth/register`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(max = 64))]
    pub username: Option<String>,

    #[serde(default)]
    #[validate(length(max = 72))]
    pub password: Option<String>,

    #[serde(default)]
    #[validate(length(max = 254))]
    pub email: Option<String>,

    #[serde(default)]
    #[validate(length(max = 100))]
    pub name: Option<String>,
}

/// Body of `POST /api/auth/reset-password`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[serde(default, alias = "email", alias = "username")]
    #[validate(length(max = 254))]
    pub identifier: Option<String>,
}

/// Body of `POST /api/auth/verify-reset`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResetRequest {
    #[serde(default)]
    #[validate(length(max = 254))]
    pub email: Option<String>,

    #[serde(default)]
    #[validate(length(max = 16))]
    pub code: Option<String>,

    #[serde(default)]
    #[validate(length(max = 72))]
    pub new_password: Option<String>,
}

/// Principal as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalDto {
    pub username: String,
    pub role: Role,
    pub can_edit: bool,
}

impl From<&SessionPrincipal> for PrincipalDto {
    fn from(principal: &SessionPrincipal) -> Self {
        Self {
            username: principal.username.clone(),
            role: principal.role,
            can_edit: principal.can_mutate(),
        }
    }
}

/// `{ principal, expiresAt }` payload of login and session responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub principal: PrincipalDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// `{ user }` payload of the registration response
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub user: PublicUser,
}

/// `{ message }` payload
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
