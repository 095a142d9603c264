//! One-way password hashing and verification backed by bcrypt.

use once_cell::sync::OnceCell;
use tracing::warn;

use folio_shared::config::HashingConfig;

use crate::errors::HashError;

/// Salted bcrypt hashing with a configurable cost factor
///
/// Pure and synchronous; the digest embeds its salt and cost so a change of
/// cost only affects newly hashed passwords.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
    dummy_digest: OnceCell<String>,
}

impl PasswordHasher {
    /// Create a hasher with the given cost, raised to bcrypt's minimum if lower
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.max(HashingConfig::MIN_COST),
            dummy_digest: OnceCell::new(),
        }
    }

    pub fn from_config(config: &HashingConfig) -> Self {
        Self::new(config.cost)
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password
    ///
    /// # Errors
    /// * `HashError::InvalidInput` - The plaintext is empty
    pub fn hash(&self, plaintext: &str) -> Result<String, HashError> {
        if plaintext.is_empty() {
            return Err(HashError::InvalidInput);
        }
        bcrypt::hash(plaintext, self.cost).map_err(|e| HashError::Backend(e.to_string()))
    }

    /// Check a plaintext password against a stored digest
    ///
    /// A malformed digest never matches.
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        match bcrypt::verify(plaintext, digest) {
            Ok(matches) => matches,
            Err(e) => {
                warn!(error = %e, "Stored password digest could not be parsed");
                false
            }
        }
    }

    /// Run one verification against a throwaway digest so that a lookup miss
    /// costs the same as a password mismatch
    pub fn verify_dummy(&self, plaintext: &str) {
        let digest = self.dummy_digest.get_or_init(|| {
            bcrypt::hash("folio-timing-equalizer", self.cost).unwrap_or_default()
        });
        let _ = bcrypt::verify(plaintext, digest);
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::from_config(&HashingConfig::default())
    }
}
