//! Webhook Config

use clap::Args;

use dripcart_app::domain::webhooks::{CART_EVENT_TOPIC, NewWebhook, WebhookError};

/// Cart webhook settings.
#[derive(Debug, Args)]
pub struct WebhookConfig {
    /// Endpoint receiving cart events; no webhook is registered when unset
    #[arg(long, env = "WEBHOOK_DELIVERY_URL")]
    pub webhook_delivery_url: Option<String>,

    /// Webhook display name
    #[arg(long, env = "WEBHOOK_NAME", default_value = "Drip Cart Events")]
    pub webhook_name: String,

    /// Secret used to sign deliveries
    #[arg(long, env = "WEBHOOK_SECRET", default_value = "", hide_env_values = true)]
    pub webhook_secret: String,
}

impl WebhookConfig {
    /// The cart event webhook to register, if a delivery URL is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart event topic cannot be parsed.
    pub fn new_webhook(&self) -> Result<Option<NewWebhook>, WebhookError> {
        let Some(delivery_url) = &self.webhook_delivery_url else {
            return Ok(None);
        };

        Ok(Some(NewWebhook {
            name: self.webhook_name.clone(),
            topic: CART_EVENT_TOPIC.parse()?,
            delivery_url: delivery_url.clone(),
            secret: self.webhook_secret.clone(),
        }))
    }
}
