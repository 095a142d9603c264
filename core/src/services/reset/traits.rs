//! Outbound email integration

use async_trait::async_trait;

/// Delivers reset codes to users
///
/// Delivery outcome never changes the response of a reset request; failures
/// are only logged.
#[async_trait]
pub trait EmailNotifier: Send + Sync {
    /// Send a reset code, returning a provider message id on success
    async fn send_reset_code(&self, to: &str, code: &str, display_name: &str) -> Result<String, String>;
}
