//! Cart event observer.
//!
//! Sends a cart event webhook after items are added, removed, or change quantity,
//! and after the cart is emptied. Restoring a removed item does not send one.

use std::sync::Arc;

use async_trait::async_trait;
use dripcart::{
    cart::CartMutation,
    payload::{StoreContext, build_cart_event},
};
use tracing::{debug, info};

use crate::domain::{
    carts::{
        hooks::{CartHook, CartHooks, CartSubscriber, HookError},
        models::CartChange,
    },
    sessions::SessionTracker,
    webhooks::{CART_EVENT_TOPIC, DispatchReport, WebhookDispatcher, WebhookEnvelope},
};

/// Hooks that produce a cart event.
pub const OBSERVED_HOOKS: [CartHook; 4] = [
    CartHook::ItemAdded,
    CartHook::ItemRemoved,
    CartHook::QuantityUpdated,
    CartHook::CartEmptied,
];

#[derive(Debug, Clone)]
pub struct CartEventObserver {
    sessions: SessionTracker,
    dispatcher: WebhookDispatcher,
    store: StoreContext,
}

impl CartEventObserver {
    #[must_use]
    pub fn new(sessions: SessionTracker, dispatcher: WebhookDispatcher, store: StoreContext) -> Self {
        Self {
            sessions,
            dispatcher,
            store,
        }
    }

    /// Subscribe the observer to every hook that produces a cart event.
    pub fn register(self: Arc<Self>, hooks: &mut CartHooks) {
        for hook in OBSERVED_HOOKS {
            hooks.subscribe(hook, self.clone());
        }
    }

    /// Build the cart event for a change and deliver it.
    ///
    /// Returns `None` when emptying a cart that had no lines, since nothing changed.
    /// Every other change starts a session if none is active. Restoring a line into
    /// a cart whose session already ended does not reopen it, so the next change
    /// reports under a new session.
    pub async fn emit(&self, change: &CartChange) -> Result<Option<DispatchReport>, HookError> {
        let shopper = &change.shopper;

        if change.mutation == (CartMutation::Emptied { lines: 0 }) {
            debug!(shopper = %shopper.id, hook = %change.hook(), "cart already empty, skipping cart event");

            return Ok(None);
        }

        let session = self.sessions.ensure(&shopper.id).await;
        let event = build_cart_event(&change.cart, &shopper.email, session.as_str(), &self.store);

        let envelope = WebhookEnvelope::for_event(&event)
            .map_err(|error| HookError::subscriber(change.hook(), error))?;

        let report = self.dispatcher.dispatch(CART_EVENT_TOPIC, &envelope).await;

        info!(
            shopper = %shopper.id,
            hook = %change.hook(),
            lines = event.cart_data.len(),
            grand_total = event.grand_total.as_str(),
            delivered = report.delivered.len(),
            failed = report.failed.len(),
            "cart event sent"
        );

        if change.cart.is_empty() {
            self.sessions.invalidate(&shopper.id).await;
        }

        Ok(Some(report))
    }
}

#[async_trait]
impl CartSubscriber for CartEventObserver {
    async fn on_cart_change(&self, change: &CartChange) -> Result<(), HookError> {
        if !OBSERVED_HOOKS.contains(&change.hook()) {
            debug!(hook = %change.hook(), "hook does not produce a cart event");

            return Ok(());
        }

        self.emit(change).await.map(|_| ())
    }
}
