//! Order notifications
//!
//! Best-effort SMS to the customer and email to the store admin after an
//! order commits. Transports sit behind [`SmsSender`] / [`EmailSender`] so
//! the dispatcher never depends on a concrete provider.

pub mod dispatcher;
pub mod email;
pub mod sms;

pub use dispatcher::{Delivery, NotificationReport, Notifier};
pub use email::HttpEmailSender;
pub use sms::HttpSmsSender;

use async_trait::async_trait;
use thiserror::Error;

/// Failure of one notification attempt. Logged, never surfaced to the client.
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("rejected by provider (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },
}

impl From<reqwest::Error> for NotificationError {
    fn from(err: reqwest::Error) -> Self {
        NotificationError::Transport(err.to_string())
    }
}

/// SMS capability
#[async_trait]
pub trait SmsSender: Send + Sync {
    async fn send(&self, to_phone: &str, message: &str) -> Result<(), NotificationError>;
}

/// Email capability
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, to_address: &str, subject: &str, body: &str)
    -> Result<(), NotificationError>;
}

/// Map a non-2xx response to [`NotificationError::Rejected`]
pub(crate) async fn check_response(resp: reqwest::Response) -> Result<String, NotificationError> {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    if status.is_success() {
        Ok(body)
    } else {
        Err(NotificationError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
