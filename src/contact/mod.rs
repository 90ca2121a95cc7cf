//! Contact form endpoint contract.
//!
//! `handle_submission` takes the raw JSON request body and always produces a
//! status code plus a `{"success", "message"}` body, whatever the input.

pub mod mailer;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use mailer::{ContactMessage, LogMailer, Mailer};

pub const MSG_SUCCESS: &str = "Message received successfully! We'll get back to you soon.";
pub const MSG_REQUIRED: &str = "All fields are required";
pub const MSG_INVALID_EMAIL: &str = "Invalid email address";
pub const MSG_INTERNAL: &str = "Internal server error";

#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("malformed request body: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("request body is null")]
    NullBody,
    #[error("missing required field")]
    MissingField,
    #[error("invalid email address {0:?}")]
    InvalidEmail(String),
    #[error("delivery failed: {0}")]
    Delivery(String),
}

impl ContactError {
    pub fn status(&self) -> u16 {
        match self {
            ContactError::MissingField | ContactError::InvalidEmail(_) => 400,
            _ => 500,
        }
    }

    /// User-facing text; internal failures stay generic
    pub fn public_message(&self) -> &'static str {
        match self {
            ContactError::MissingField => MSG_REQUIRED,
            ContactError::InvalidEmail(_) => MSG_INVALID_EMAIL,
            _ => MSG_INTERNAL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactReply {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactResponse {
    pub status: u16,
    pub body: ContactReply,
}

impl ContactResponse {
    fn ok() -> Self {
        Self {
            status: 200,
            body: ContactReply {
                success: true,
                message: MSG_SUCCESS.to_string(),
            },
        }
    }

    fn from_error(error: &ContactError) -> Self {
        Self {
            status: error.status(),
            body: ContactReply {
                success: false,
                message: error.public_message().to_string(),
            },
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.body)
    }
}

/// Present-and-truthy field as text. Empty strings, `null`, `false` and `0`
/// count as missing.
fn required(body: &Value, key: &str) -> Result<String, ContactError> {
    match body.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Value::Number(n)) if n.as_f64().is_some_and(|f| f != 0.0) => Ok(n.to_string()),
        Some(Value::Bool(true)) => Ok("true".to_string()),
        Some(v @ (Value::Array(_) | Value::Object(_))) => Ok(v.to_string()),
        _ => Err(ContactError::MissingField),
    }
}

/// Equivalent to `^[^\s@]+@[^\s@]+\.[^\s@]+$`
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let clean = |s: &str| !s.is_empty() && !s.chars().any(|c| c == '@' || c.is_whitespace());
    if !clean(local) || !clean(domain) {
        return false;
    }
    // a dot with at least one character on each side
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

fn validate(raw: &str) -> Result<ContactMessage, ContactError> {
    let body: Value = serde_json::from_str(raw)?;
    if body.is_null() {
        return Err(ContactError::NullBody);
    }

    let name = required(&body, "name")?;
    let email = required(&body, "email")?;
    let message = required(&body, "message")?;

    if !is_valid_email(&email) {
        return Err(ContactError::InvalidEmail(email));
    }

    Ok(ContactMessage {
        name,
        email,
        message,
        received_at: Utc::now(),
    })
}

/// Validate and deliver one submission. Single attempt, no retry.
pub fn handle_submission(raw: &str, mailer: &dyn Mailer) -> ContactResponse {
    let result = validate(raw).and_then(|message| mailer.deliver(&message));
    match result {
        Ok(()) => ContactResponse::ok(),
        Err(e) => {
            if e.status() >= 500 {
                log::error!("Contact form error: {}", e);
            } else {
                log::debug!("Contact form rejected: {}", e);
            }
            ContactResponse::from_error(&e)
        }
    }
}
