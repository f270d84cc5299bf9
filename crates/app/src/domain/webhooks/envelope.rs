//! Webhook envelope.
//!
//! Action webhooks deliver `{ "action": <hook>, "arg": <argument> }`. The cart
//! event travels as base64 encoded JSON in `arg`.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use dripcart::events::CartEvent;
use serde::{Deserialize, Serialize};

use crate::domain::webhooks::{CART_EVENT_ACTION, errors::WebhookError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookEnvelope {
    pub action: String,
    pub arg: String,
}

impl WebhookEnvelope {
    /// Wrap a cart event for delivery.
    pub fn for_event(event: &CartEvent) -> Result<Self, WebhookError> {
        let json = serde_json::to_vec(event).map_err(WebhookError::Encode)?;

        Ok(Self {
            action: CART_EVENT_ACTION.to_string(),
            arg: BASE64.encode(json),
        })
    }

    /// Decode the cart event carried in `arg`.
    pub fn decode_event(&self) -> Result<CartEvent, WebhookError> {
        let json = BASE64.decode(&self.arg)?;

        serde_json::from_slice(&json).map_err(WebhookError::InvalidPayload)
    }

    /// Serialized request body.
    pub fn to_body(&self) -> Result<Vec<u8>, WebhookError> {
        serde_json::to_vec(self).map_err(WebhookError::Encode)
    }
}
