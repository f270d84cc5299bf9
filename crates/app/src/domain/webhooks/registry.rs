//! Webhook registry.

use std::sync::{
    PoisonError, RwLock,
    atomic::{AtomicU64, Ordering},
};

use jiff::Timestamp;
use tracing::{error, info};

use crate::domain::webhooks::{
    MAX_DELIVERY_FAILURES,
    errors::WebhookError,
    models::{NewWebhook, Webhook, WebhookId, WebhookStatus},
};

/// In-process registry of webhooks and their delivery health.
#[derive(Debug)]
pub struct WebhookRegistry {
    next_id: AtomicU64,
    webhooks: RwLock<Vec<Webhook>>,
}

impl Default for WebhookRegistry {
    fn default() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            webhooks: RwLock::default(),
        }
    }
}

impl WebhookRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new, active webhook.
    pub fn create(&self, webhook: NewWebhook) -> Webhook {
        let created = Webhook {
            id: WebhookId::new(self.next_id.fetch_add(1, Ordering::Relaxed)),
            name: webhook.name,
            topic: webhook.topic,
            delivery_url: webhook.delivery_url,
            secret: webhook.secret,
            status: WebhookStatus::Active,
            failure_count: 0,
            created_at: Timestamp::now(),
        };

        info!(
            webhook = %created.id,
            topic = %created.topic,
            delivery_url = %created.delivery_url,
            "webhook registered"
        );

        self.webhooks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(created.clone());

        created
    }

    /// All webhooks in registration order.
    pub fn list(&self) -> Vec<Webhook> {
        self.webhooks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn get(&self, id: WebhookId) -> Result<Webhook, WebhookError> {
        self.webhooks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|webhook| webhook.id == id)
            .cloned()
            .ok_or(WebhookError::NotFound(id))
    }

    /// Active webhooks subscribed to a topic.
    pub fn active_for(&self, topic: &str) -> Vec<Webhook> {
        self.webhooks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|webhook| webhook.is_active() && webhook.topic.to_string() == topic)
            .cloned()
            .collect()
    }

    /// Reset the failure count after a successful delivery.
    pub fn record_success(&self, id: WebhookId) -> Result<Webhook, WebhookError> {
        self.update(id, |webhook| webhook.failure_count = 0)
    }

    /// Count a failed delivery, disabling the webhook once it has failed too often in a row.
    pub fn record_failure(&self, id: WebhookId) -> Result<Webhook, WebhookError> {
        let webhook = self.update(id, |webhook| {
            webhook.failure_count = webhook.failure_count.saturating_add(1);

            if webhook.failure_count >= MAX_DELIVERY_FAILURES {
                webhook.status = WebhookStatus::Disabled;
            }
        })?;

        if webhook.status == WebhookStatus::Disabled {
            error!(
                webhook = %webhook.id,
                failures = webhook.failure_count,
                "webhook disabled after repeated delivery failures"
            );
        }

        Ok(webhook)
    }

    fn update(
        &self,
        id: WebhookId,
        apply: impl FnOnce(&mut Webhook),
    ) -> Result<Webhook, WebhookError> {
        let mut webhooks = self.webhooks.write().unwrap_or_else(PoisonError::into_inner);

        let webhook = webhooks
            .iter_mut()
            .find(|webhook| webhook.id == id)
            .ok_or(WebhookError::NotFound(id))?;

        apply(webhook);

        Ok(webhook.clone())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::webhooks::CART_EVENT_TOPIC;

    use super::*;

    fn new_webhook() -> TestResult<NewWebhook> {
        Ok(NewWebhook {
            name: "Drip Cart Events".to_string(),
            topic: CART_EVENT_TOPIC.parse()?,
            delivery_url: "http://localhost:9000/hook".to_string(),
            secret: "secret".to_string(),
        })
    }

    #[test]
    fn created_webhooks_are_active_with_sequential_ids() -> TestResult {
        let registry = WebhookRegistry::new();

        let first = registry.create(new_webhook()?);
        let second = registry.create(new_webhook()?);

        assert_eq!(first.id, WebhookId::new(1));
        assert_eq!(second.id, WebhookId::new(2));
        assert_eq!(first.status, WebhookStatus::Active);
        assert_eq!(registry.list().len(), 2);
        assert_eq!(registry.get(second.id)?, second);

        Ok(())
    }

    #[test]
    fn active_for_filters_by_topic_and_status() -> TestResult {
        let registry = WebhookRegistry::new();

        let cart = registry.create(new_webhook()?);
        let disabled = registry.create(new_webhook()?);

        registry.create(NewWebhook {
            topic: "order.created".parse()?,
            ..new_webhook()?
        });

        for _ in 0..MAX_DELIVERY_FAILURES {
            registry.record_failure(disabled.id)?;
        }

        let active = registry.active_for(CART_EVENT_TOPIC);

        assert_eq!(active.len(), 1);
        assert_eq!(active.first().map(|w| w.id), Some(cart.id));

        Ok(())
    }

    #[test]
    fn repeated_failures_disable_webhook() -> TestResult {
        let registry = WebhookRegistry::new();
        let webhook = registry.create(new_webhook()?);

        for _ in 1..MAX_DELIVERY_FAILURES {
            assert_eq!(registry.record_failure(webhook.id)?.status, WebhookStatus::Active);
        }

        let disabled = registry.record_failure(webhook.id)?;

        assert_eq!(disabled.status, WebhookStatus::Disabled);
        assert_eq!(disabled.failure_count, MAX_DELIVERY_FAILURES);
        assert!(registry.active_for(CART_EVENT_TOPIC).is_empty(), "disabled webhook is inactive");

        Ok(())
    }

    #[test]
    fn success_resets_failure_count() -> TestResult {
        let registry = WebhookRegistry::new();
        let webhook = registry.create(new_webhook()?);

        registry.record_failure(webhook.id)?;
        registry.record_failure(webhook.id)?;

        assert_eq!(registry.record_success(webhook.id)?.failure_count, 0);

        Ok(())
    }

    #[test]
    fn unknown_webhook_is_not_found() {
        let registry = WebhookRegistry::new();

        assert!(
            matches!(
                registry.record_failure(WebhookId::new(42)),
                Err(WebhookError::NotFound(id)) if id == WebhookId::new(42)
            ),
            "expected NotFound"
        );
    }
}
