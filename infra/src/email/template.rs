//! Reset email content

/// Subject line of every reset email
pub const RESET_EMAIL_SUBJECT: &str = "Password Reset Request";

/// Rendered reset email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetEmail {
    pub subject: String,
    pub html: String,
}

/// Render the reset email for a recipient
///
/// The body greets the account by display name, shows the code, states the
/// one hour validity and links to the login page.
pub fn render_reset_email(code: &str, display_name: &str, login_url: &str) -> ResetEmail {
    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
  <h1 style="color: #333;">Password Reset Request</h1>
  <p>Hi <strong>{name}</strong>,</p>
  <p>We received a request to reset your password. Use the verification code below to proceed:</p>
  <p style="font-size: 32px; font-weight: bold; letter-spacing: 2px; text-align: center;">{code}</p>
  <p>This code will expire in <strong>1 hour</strong>.</p>
  <ol>
    <li>Go to the login page and open the "Reset" tab</li>
    <li>Enter your email address, the code and your new password</li>
  </ol>
  <p style="text-align: center;"><a href="{link}">Go to Login</a></p>
  <p style="color: #999; font-size: 12px;">If you didn't request a password reset, you can ignore this email.</p>
</div>"#,
        name = escape_html(display_name),
        code = escape_html(code),
        link = escape_html(login_url),
    );

    ResetEmail {
        subject: RESET_EMAIL_SUBJECT.to_string(),
        html,
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
