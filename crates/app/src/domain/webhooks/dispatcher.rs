//! Webhook dispatcher.

use std::{fmt, sync::Arc};

use tracing::{info, warn};

use crate::domain::webhooks::{
    envelope::WebhookEnvelope, models::WebhookId, registry::WebhookRegistry,
    transport::WebhookTransport,
};

/// Delivery outcome for one dispatched envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub delivered: Vec<WebhookId>,
    pub failed: Vec<WebhookId>,
    pub disabled: Vec<WebhookId>,
}

impl DispatchReport {
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.delivered.len() + self.failed.len()
    }
}

/// Delivers envelopes to every active webhook of a topic.
///
/// Failed deliveries are counted against the webhook and never returned as errors.
#[derive(Clone)]
pub struct WebhookDispatcher {
    registry: Arc<WebhookRegistry>,
    transport: Arc<dyn WebhookTransport>,
}

impl fmt::Debug for WebhookDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookDispatcher")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl WebhookDispatcher {
    pub fn new(registry: Arc<WebhookRegistry>, transport: Arc<dyn WebhookTransport>) -> Self {
        Self {
            registry,
            transport,
        }
    }

    pub async fn dispatch(&self, topic: &str, envelope: &WebhookEnvelope) -> DispatchReport {
        let mut report = DispatchReport::default();

        for webhook in self.registry.active_for(topic) {
            match self.transport.deliver(&webhook, envelope).await {
                Ok(receipt) => {
                    info!(
                        webhook = %webhook.id,
                        delivery_id = %receipt.delivery_id,
                        status = receipt.status,
                        %topic,
                        "webhook delivered"
                    );

                    if let Err(error) = self.registry.record_success(webhook.id) {
                        warn!(webhook = %webhook.id, %error, "failed to record webhook delivery");
                    }

                    report.delivered.push(webhook.id);
                }
                Err(error) => {
                    warn!(
                        webhook = %webhook.id,
                        delivery_url = %webhook.delivery_url,
                        %error,
                        %topic,
                        "webhook delivery failed"
                    );

                    report.failed.push(webhook.id);

                    match self.registry.record_failure(webhook.id) {
                        Ok(updated) if !updated.is_active() => report.disabled.push(updated.id),
                        Ok(_) => {}
                        Err(error) => {
                            warn!(webhook = %webhook.id, %error, "failed to record webhook failure");
                        }
                    }
                }
            }
        }

        report
    }
}
