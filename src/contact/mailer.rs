use chrono::{DateTime, SecondsFormat, Utc};

use super::ContactError;

/// A validated submission, stamped when it was accepted
#[derive(Debug, Clone, PartialEq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
    pub received_at: DateTime<Utc>,
}

impl ContactMessage {
    /// ISO-8601 with millisecond precision and a `Z` suffix
    pub fn timestamp(&self) -> String {
        self.received_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Delivery backend for accepted submissions
pub trait Mailer {
    fn deliver(&self, message: &ContactMessage) -> Result<(), ContactError>;
}

/// Stub mailer: records the submission in the log and reports success
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn deliver(&self, message: &ContactMessage) -> Result<(), ContactError> {
        log::info!(
            "Contact form submission: name={:?} email={:?} message={:?} timestamp={}",
            message.name,
            message.email,
            message.message,
            message.timestamp()
        );
        Ok(())
    }
}
