//! Session principal: the identity and role attached to an authenticated request.

use serde::{Deserialize, Serialize};

use crate::domain::entities::user::{Role, User};

/// Ephemeral result of a successful authentication, never persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPrincipal {
    pub username: String,
    pub role: Role,
}

impl SessionPrincipal {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }

    pub fn is_editor(&self) -> bool {
        self.role == Role::Editor
    }

    /// Whether this principal may create, update or delete content
    pub fn can_mutate(&self) -> bool {
        self.is_editor()
    }
}

impl From<&User> for SessionPrincipal {
    fn from(user: &User) -> Self {
        Self::new(user.username.clone(), user.role)
    }
}
