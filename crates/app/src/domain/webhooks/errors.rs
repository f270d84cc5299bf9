//! Webhook errors.

use thiserror::Error;

use crate::domain::webhooks::models::WebhookId;

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("webhook {0} not found")]
    NotFound(WebhookId),

    #[error("invalid webhook topic: {0}")]
    InvalidTopic(String),

    #[error("failed to encode webhook payload")]
    Encode(#[source] serde_json::Error),

    #[error("webhook argument is not valid base64")]
    InvalidEncoding(#[from] base64::DecodeError),

    #[error("webhook argument is not a valid cart event")]
    InvalidPayload(#[source] serde_json::Error),

    #[error("webhook delivery failed")]
    Http(#[from] reqwest::Error),

    #[error("webhook endpoint responded with status {0}")]
    UnexpectedStatus(u16),
}
