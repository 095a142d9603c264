//! User entity representing an account that can sign in to the admin surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access level attached to a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full mutation rights on content
    Editor,
    /// Read-only access
    #[default]
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Editor => "editor",
            Role::Viewer => "viewer",
        }
    }

    /// Parse a stored role, falling back to `Viewer` for anything unrecognised
    pub fn parse_or_viewer(value: &str) -> Self {
        value.parse().unwrap_or(Role::Viewer)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "editor" => Ok(Role::Editor),
            "viewer" => Ok(Role::Viewer),
            other => Err(format!("Invalid role: {}", other)),
        }
    }
}

/// User entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Unique login name
    pub username: String,

    /// Optional email, unique when present
    pub email: Option<String>,

    /// bcrypt digest of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Optional display name
    pub name: Option<String>,

    pub role: Role,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a self-registered user. Registration never grants `Editor`.
    pub fn register(
        username: String,
        email: Option<String>,
        password_hash: String,
        name: Option<String>,
    ) -> Self {
        Self::seeded(username, email, password_hash, name, Role::Viewer)
    }

    /// Creates a user with an explicit role (seeding and tests)
    pub fn seeded(
        username: String,
        email: Option<String>,
        password_hash: String,
        name: Option<String>,
        role: Role,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            name,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the stored password digest
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Name used when addressing the user, `name` if set, otherwise `username`
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.username)
    }

    pub fn is_editor(&self) -> bool {
        self.role == Role::Editor
    }

    /// Projection safe to return to clients
    pub fn public_profile(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
        }
    }
}

/// Public view of a user, never carries the password digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Role,
}
