//! Recording email notifier for tests

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use super::traits::EmailNotifier;

/// A message captured by [`RecordingNotifier`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub to: String,
    pub code: String,
    pub display_name: String,
}

/// Notifier that stores every message instead of sending it
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<SentEmail>>>,
    should_fail: bool,
    delay: Option<Duration>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier that records the attempt but reports a delivery failure
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// A notifier that stalls for `delay` before recording the message
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().await.clone()
    }

    /// Wait until at least `count` messages were handed over, up to one second
    pub async fn wait_for(&self, count: usize) -> Vec<SentEmail> {
        for _ in 0..200 {
            let sent = self.sent().await;
            if sent.len() >= count {
                return sent;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        self.sent().await
    }
}

#[async_trait]
impl EmailNotifier for RecordingNotifier {
    async fn send_reset_code(&self, to: &str, code: &str, display_name: &str) -> Result<String, String> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let mut sent = self.sent.lock().await;
        sent.push(SentEmail {
            to: to.to_string(),
            code: code.to_string(),
            display_name: display_name.to_string(),
        });
        if self.should_fail {
            return Err("provider rejected message".to_string());
        }
        Ok(format!("msg-{}", sent.len()))
    }
}
