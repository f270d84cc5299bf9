//! Cart hooks.
//!
//! Subscribers register for the cart hooks they care about and are notified, in
//! registration order, after each matching cart mutation.

use std::{error::Error as StdError, fmt, sync::Arc};

use async_trait::async_trait;
use dripcart::cart::CartMutation;
use mockall::automock;
use thiserror::Error;
use tracing::debug;

use crate::domain::carts::models::CartChange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartHook {
    ItemAdded,
    ItemRemoved,
    ItemRestored,
    QuantityUpdated,
    CartEmptied,
}

impl CartHook {
    /// Host action name of the hook.
    #[must_use]
    pub const fn action(self) -> &'static str {
        match self {
            Self::ItemAdded => "woocommerce_add_to_cart",
            Self::ItemRemoved => "woocommerce_cart_item_removed",
            Self::ItemRestored => "woocommerce_cart_item_restored",
            Self::QuantityUpdated => "woocommerce_after_cart_item_quantity_update",
            Self::CartEmptied => "woocommerce_cart_emptied",
        }
    }
}

impl fmt::Display for CartHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action())
    }
}

impl From<&CartMutation> for CartHook {
    fn from(mutation: &CartMutation) -> Self {
        match mutation {
            CartMutation::ItemAdded { .. } => Self::ItemAdded,
            CartMutation::ItemRemoved { .. } => Self::ItemRemoved,
            CartMutation::ItemRestored { .. } => Self::ItemRestored,
            CartMutation::QuantityUpdated { .. } => Self::QuantityUpdated,
            CartMutation::Emptied { .. } => Self::CartEmptied,
        }
    }
}

#[derive(Debug, Error)]
pub enum HookError {
    #[error("{hook} subscriber failed")]
    Subscriber {
        hook: CartHook,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl HookError {
    pub fn subscriber(hook: CartHook, source: impl StdError + Send + Sync + 'static) -> Self {
        Self::Subscriber {
            hook,
            source: Box::new(source),
        }
    }
}

#[automock]
#[async_trait]
pub trait CartSubscriber: Send + Sync {
    /// Handle a cart change for a hook this subscriber registered for.
    async fn on_cart_change(&self, change: &CartChange) -> Result<(), HookError>;
}

/// Registry of cart hook subscribers.
#[derive(Clone, Default)]
pub struct CartHooks {
    subscribers: Vec<(CartHook, Arc<dyn CartSubscriber>)>,
}

impl fmt::Debug for CartHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.subscribers.iter().map(|(hook, _)| hook))
            .finish()
    }
}

impl CartHooks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, hook: CartHook, subscriber: Arc<dyn CartSubscriber>) {
        self.subscribers.push((hook, subscriber));
    }

    #[must_use]
    pub fn has_subscribers(&self, hook: CartHook) -> bool {
        self.subscribers.iter().any(|(registered, _)| *registered == hook)
    }

    /// Notify the subscribers of the change's hook, stopping at the first error.
    ///
    /// Returns the number of subscribers notified.
    pub async fn fire(&self, change: &CartChange) -> Result<usize, HookError> {
        let hook = change.hook();
        let mut notified = 0;

        for (_, subscriber) in self.subscribers.iter().filter(|(h, _)| *h == hook) {
            subscriber.on_cart_change(change).await?;
            notified += 1;
        }

        if notified == 0 {
            debug!(%hook, shopper = %change.shopper.id, "no subscribers for cart hook");
        }

        Ok(notified)
    }
}
