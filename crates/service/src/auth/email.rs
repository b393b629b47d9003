//! Outbound email abstraction.
//!
//! The shipped sender writes messages to the log; tests use the recording mock.

use async_trait::async_trait;
use tracing::info;

use super::errors::AuthError;

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), AuthError>;
}

/// Logs every message instead of delivering it.
#[derive(Debug, Default, Clone)]
pub struct LoggingEmailSender;

#[async_trait]
impl EmailSender for LoggingEmailSender {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), AuthError> {
        info!(%to, %subject, %body, "email_dispatched");
        Ok(())
    }
}

pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    pub struct SentEmail {
        pub to: String,
        pub subject: String,
        pub body: String,
    }

    /// Records messages; can be switched to fail every send.
    #[derive(Default)]
    pub struct MockEmailSender {
        sent: Mutex<Vec<SentEmail>>,
        simulate_failure: bool,
    }

    impl MockEmailSender {
        pub fn failing() -> Self {
            Self { sent: Mutex::new(Vec::new()), simulate_failure: true }
        }

        pub fn sent(&self) -> Vec<SentEmail> {
            self.sent.lock().unwrap().clone()
        }

        /// Numeric code from the latest message to `to` with the given subject.
        pub fn last_code(&self, to: &str, subject: &str) -> Option<String> {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|m| m.to == to && m.subject == subject)
                .and_then(|m| {
                    m.body
                        .split(|c: char| !c.is_ascii_digit())
                        .find(|s| s.len() == crate::auth::crypto::CODE_LENGTH)
                        .map(str::to_string)
                })
        }
    }

    #[async_trait]
    impl EmailSender for MockEmailSender {
        async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), AuthError> {
            if self.simulate_failure {
                return Err(AuthError::Email("simulated failure".into()));
            }
            self.sent.lock().unwrap().push(SentEmail { to: to.into(), subject: subject.into(), body: body.into() });
            Ok(())
        }
    }
}
