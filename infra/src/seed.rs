//! Seeding of the editor account
//!
//! Self-registration only ever produces viewers, so the site owner's
//! `editor` account is created here at startup. Seeding never modifies an
//! existing account.

use tracing::info;

use folio_core::domain::entities::user::{Role, User};
use folio_core::errors::{DomainResult, ValidationError};
use folio_core::repositories::UserRepository;
use folio_core::services::password::PasswordHasher;

/// Account to seed
#[derive(Debug, Clone)]
pub struct SeedUser {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl SeedUser {
    /// Read `SEED_EDITOR_USERNAME`, `SEED_EDITOR_PASSWORD` and the optional
    /// `SEED_EDITOR_EMAIL` / `SEED_EDITOR_NAME`
    ///
    /// Returns `None` unless both username and password are set.
    pub fn from_env() -> Option<Self> {
        let var = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        Some(Self {
            username: var("SEED_EDITOR_USERNAME")?,
            password: var("SEED_EDITOR_PASSWORD")?,
            email: var("SEED_EDITOR_EMAIL"),
            name: var("SEED_EDITOR_NAME"),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Created,
    AlreadyPresent,
}

/// Insert an `editor` account unless the username is already taken
pub async fn seed_editor<R>(
    repository: &R,
    hasher: &PasswordHasher,
    seed: SeedUser,
) -> DomainResult<SeedOutcome>
where
    R: UserRepository + ?Sized,
{
    if seed.username.trim().is_empty() {
        return Err(ValidationError::required("username").into());
    }
    if seed.password.is_empty() {
        return Err(ValidationError::required("password").into());
    }

    if repository.find_by_username(&seed.username).await?.is_some() {
        info!(username = %seed.username, "Editor account already present, skipping seed");
        return Ok(SeedOutcome::AlreadyPresent);
    }

    let password_hash = hasher.hash(&seed.password)?;
    let user = User::seeded(seed.username, seed.email, password_hash, seed.name, Role::Editor);
    let user = repository.create(user).await?;

    info!(user_id = %user.id, username = %user.username, "Seeded editor account");
    Ok(SeedOutcome::Created)
}
