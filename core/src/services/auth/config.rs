//! Configuration for the authentication service

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Minimum username length in characters
    pub min_username_length: usize,
    /// Minimum password length in characters
    pub min_password_length: usize,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            min_username_length: 3,
            min_password_length: 6,
        }
    }
}
