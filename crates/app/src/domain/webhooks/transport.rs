//! Webhook transport.

use std::fmt;

use async_trait::async_trait;
use mockall::automock;
use reqwest::{
    Client,
    header::{CONTENT_TYPE, USER_AGENT},
};
use uuid::Uuid;

use crate::domain::webhooks::{
    envelope::WebhookEnvelope, errors::WebhookError, models::Webhook, signature,
};

pub const HEADER_SOURCE: &str = "X-WC-Webhook-Source";
pub const HEADER_TOPIC: &str = "X-WC-Webhook-Topic";
pub const HEADER_RESOURCE: &str = "X-WC-Webhook-Resource";
pub const HEADER_EVENT: &str = "X-WC-Webhook-Event";
pub const HEADER_SIGNATURE: &str = "X-WC-Webhook-Signature";
pub const HEADER_ID: &str = "X-WC-Webhook-ID";
pub const HEADER_DELIVERY_ID: &str = "X-WC-Webhook-Delivery-ID";

/// Identity the transport presents to webhook endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookshotConfig {
    /// Site URL, sent as the webhook source.
    pub site_url: String,

    pub woocommerce_version: String,

    pub wordpress_version: String,
}

impl HookshotConfig {
    /// e.g. `WooCommerce/3.5.4 Hookshot (WordPress/5.0.3)`
    #[must_use]
    pub fn user_agent(&self) -> String {
        format!(
            "WooCommerce/{} Hookshot (WordPress/{})",
            self.woocommerce_version, self.wordpress_version
        )
    }

    /// Site URL with a single trailing slash.
    #[must_use]
    pub fn source(&self) -> String {
        format!("{}/", self.site_url.trim_end_matches('/'))
    }
}

impl Default for HookshotConfig {
    fn default() -> Self {
        Self {
            site_url: "http://localhost:3007".to_string(),
            woocommerce_version: "3.5.4".to_string(),
            wordpress_version: "5.0.3".to_string(),
        }
    }
}

/// Outcome of a delivery the endpoint accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub delivery_id: Uuid,
    pub status: u16,
}

#[derive(Clone)]
pub struct HttpWebhookTransport {
    config: HookshotConfig,
    http: Client,
}

impl fmt::Debug for HttpWebhookTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpWebhookTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HttpWebhookTransport {
    #[must_use]
    pub fn new(config: HookshotConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl WebhookTransport for HttpWebhookTransport {
    async fn deliver(
        &self,
        webhook: &Webhook,
        envelope: &WebhookEnvelope,
    ) -> Result<DeliveryReceipt, WebhookError> {
        let body = envelope.to_body()?;
        let delivery_id = Uuid::now_v7();

        let response = self
            .http
            .post(&webhook.delivery_url)
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, self.config.user_agent())
            .header(HEADER_SOURCE, self.config.source())
            .header(HEADER_TOPIC, webhook.topic.to_string())
            .header(HEADER_RESOURCE, webhook.topic.resource())
            .header(HEADER_EVENT, webhook.topic.event())
            .header(HEADER_SIGNATURE, signature::sign(&body, &webhook.secret))
            .header(HEADER_ID, webhook.id.to_string())
            .header(HEADER_DELIVERY_ID, delivery_id.to_string())
            .body(body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            return Err(WebhookError::UnexpectedStatus(status.as_u16()));
        }

        Ok(DeliveryReceipt {
            delivery_id,
            status: status.as_u16(),
        })
    }
}

#[automock]
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    /// Deliver an envelope to a webhook's endpoint.
    async fn deliver(
        &self,
        webhook: &Webhook,
        envelope: &WebhookEnvelope,
    ) -> Result<DeliveryReceipt, WebhookError>;
}
