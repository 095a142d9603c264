//! Email Module
//!
//! Delivery of password-reset codes. Implements
//! [`EmailNotifier`](folio_core::services::reset::EmailNotifier) with:
//!
//! - **Resend**: production delivery through the Resend HTTP API
//! - **Console**: development fallback that writes the message to the log

use std::sync::Arc;

use folio_core::services::reset::EmailNotifier;
use folio_shared::config::{EmailConfig, EmailProvider};

pub mod console;
pub mod resend;
pub mod template;

#[cfg(test)]
mod tests;

pub use console::ConsoleEmailNotifier;
pub use resend::ResendEmailNotifier;
pub use template::{render_reset_email, ResetEmail, RESET_EMAIL_SUBJECT};

/// Create an email notifier based on configuration
///
/// A Resend provider without an API key, or one whose client cannot be
/// built, falls back to the console notifier.
pub fn create_email_notifier(config: &EmailConfig) -> Arc<dyn EmailNotifier> {
    match config.provider {
        EmailProvider::Console => {
            tracing::info!("Reset emails will be written to the log");
            Arc::new(ConsoleEmailNotifier::new(config.login_url()))
        }
        EmailProvider::Resend => match ResendEmailNotifier::new(config.clone()) {
            Ok(notifier) => {
                tracing::info!(from = %config.from_address, "Reset emails will be sent via Resend");
                Arc::new(notifier)
            }
            Err(e) => {
                tracing::error!("Failed to initialize Resend email service: {}", e);
                tracing::warn!("Falling back to console email service");
                Arc::new(ConsoleEmailNotifier::new(config.login_url()))
            }
        },
    }
}
