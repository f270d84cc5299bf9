//! Webhook Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::domain::webhooks::errors::WebhookError;

/// Webhook identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WebhookId(u64);

impl WebhookId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WebhookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebhookStatus {
    Active,
    Disabled,
}

/// Webhook topic, `<resource>.<event>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WebhookTopic {
    resource: String,
    event: String,
}

impl WebhookTopic {
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    #[must_use]
    pub fn event(&self) -> &str {
        &self.event
    }
}

impl FromStr for WebhookTopic {
    type Err = WebhookError;

    fn from_str(topic: &str) -> Result<Self, Self::Err> {
        match topic.split_once('.') {
            Some((resource, event)) if !resource.is_empty() && !event.is_empty() => Ok(Self {
                resource: resource.to_string(),
                event: event.to_string(),
            }),
            _ => Err(WebhookError::InvalidTopic(topic.to_string())),
        }
    }
}

impl TryFrom<String> for WebhookTopic {
    type Error = WebhookError;

    fn try_from(topic: String) -> Result<Self, Self::Error> {
        topic.parse()
    }
}

impl From<WebhookTopic> for String {
    fn from(topic: WebhookTopic) -> Self {
        topic.to_string()
    }
}

impl fmt::Display for WebhookTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.resource, self.event)
    }
}

/// Webhook Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Webhook {
    pub id: WebhookId,
    pub name: String,
    pub topic: WebhookTopic,
    pub delivery_url: String,
    pub secret: String,
    pub status: WebhookStatus,
    pub failure_count: u32,
    pub created_at: Timestamp,
}

impl Webhook {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == WebhookStatus::Active
    }
}

/// New Webhook Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWebhook {
    pub name: String,
    pub topic: WebhookTopic,
    pub delivery_url: String,
    pub secret: String,
}
