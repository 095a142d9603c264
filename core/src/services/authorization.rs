//! Role checks for mutating operations.
//!
//! Presence of a session is enforced by the HTTP layer; this module decides
//! what an authenticated principal may do. Every mutation re-derives the
//! role from the verified session, independent of any client state.

use tracing::warn;

use crate::domain::value_objects::SessionPrincipal;
use crate::errors::AuthError;

/// Require the `editor` role
///
/// # Errors
/// * `AuthError::Forbidden` naming the caller's current role
pub fn require_editor(principal: &SessionPrincipal) -> Result<(), AuthError> {
    if principal.can_mutate() {
        return Ok(());
    }
    warn!(
        username = %principal.username,
        role = %principal.role,
        "Mutation refused for non-editor"
    );
    Err(AuthError::Forbidden {
        role: principal.role.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::user::Role;

    #[test]
    fn test_editor_allowed() {
        assert!(require_editor(&SessionPrincipal::new("owner", Role::Editor)).is_ok());
    }

    #[test]
    fn test_viewer_forbidden_with_role_named() {
        let err = require_editor(&SessionPrincipal::new("alice", Role::Viewer)).unwrap_err();
        assert_eq!(
            err,
            AuthError::Forbidden {
                role: "viewer".to_string()
            }
        );
        assert!(err.to_string().contains("viewer"));
    }
}
