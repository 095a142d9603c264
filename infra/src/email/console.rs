//! Console email notifier for development
//!
//! Writes the reset message to the log instead of sending it. This is the
//! only place a reset code is ever logged.

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use folio_core::services::reset::EmailNotifier;

use super::template::render_reset_email;

pub struct ConsoleEmailNotifier {
    login_url: String,
}

impl ConsoleEmailNotifier {
    pub fn new(login_url: impl Into<String>) -> Self {
        Self {
            login_url: login_url.into(),
        }
    }
}

#[async_trait]
impl EmailNotifier for ConsoleEmailNotifier {
    async fn send_reset_code(
        &self,
        to: &str,
        code: &str,
        display_name: &str,
    ) -> Result<String, String> {
        let email = render_reset_email(code, display_name, &self.login_url);
        let message_id = format!("console-{}", Uuid::new_v4());

        info!(
            to = %to,
            subject = %email.subject,
            code = %code,
            login_url = %self.login_url,
            message_id = %message_id,
            "Password reset email (console delivery)"
        );

        Ok(message_id)
    }
}
