//! Webhooks
//!
//! Delivery of cart events to registered webhook endpoints, using the envelope
//! and headers of WooCommerce's webhook delivery.

pub mod dispatcher;
pub mod envelope;
pub mod errors;
pub mod models;
pub mod registry;
pub mod signature;
pub mod transport;

pub use dispatcher::*;
pub use envelope::WebhookEnvelope;
pub use errors::WebhookError;
pub use models::{NewWebhook, Webhook, WebhookId, WebhookStatus};
pub use registry::WebhookRegistry;
pub use transport::*;

/// Action fired for every cart event.
pub const CART_EVENT_ACTION: &str = "wc_drip_woocommerce_cart_event";

/// Webhook topic subscribed to cart events.
pub const CART_EVENT_TOPIC: &str = "action.wc_drip_woocommerce_cart_event";

/// Number of consecutive delivery failures after which a webhook is disabled.
pub const MAX_DELIVERY_FAILURES: u32 = 5;
