use std::sync::{Arc, Mutex, PoisonError};

use tracing::info;

use crate::config::SmsConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsMessage {
    pub to: String,
    pub body: String,
}

/// Outgoing text messages.
///
/// No gateway is wired in: `Log` writes each message to the tracing output so
/// operators can relay codes by hand in development, `Mock` records them for
/// tests.
#[derive(Debug, Clone)]
pub enum SmsSender {
    Log,
    Mock(Arc<Mutex<Vec<SmsMessage>>>),
}

impl SmsSender {
    #[must_use]
    pub fn mock() -> Self {
        Self::Mock(Arc::default())
    }

    #[must_use]
    pub fn from_config(config: &SmsConfig) -> Self {
        match config {
            SmsConfig::Log => Self::Log,
            SmsConfig::Mock => Self::mock(),
        }
    }

    pub async fn send(&self, to: &str, body: &str) {
        match self {
            Self::Log => info!("SMS to {to}: {body}"),
            Self::Mock(outbox) => outbox
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(SmsMessage {
                    to: to.to_owned(),
                    body: body.to_owned(),
                }),
        }
    }

    /// Recorded messages, or `None` when messages are only logged.
    #[must_use]
    pub fn messages(&self) -> Option<Vec<SmsMessage>> {
        match self {
            Self::Log => None,
            Self::Mock(outbox) => Some(
                outbox
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .clone(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_sender_records_messages() {
        let sender = SmsSender::from_config(&SmsConfig::Mock);

        sender.send("9876543210", "Your code is 123456").await;

        assert_eq!(
            sender.messages().unwrap(),
            vec![SmsMessage {
                to: "9876543210".to_owned(),
                body: "Your code is 123456".to_owned(),
            }]
        );
    }

    #[test]
    fn log_sender_keeps_nothing() {
        assert!(SmsSender::from_config(&SmsConfig::Log).messages().is_none());
    }
}
