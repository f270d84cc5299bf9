//! Cart Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use dripcart::{
    cart::Cart,
    events::{CartData, CartEvent, EventAction, GrandTotal},
    items::CartItem,
    payload::build_cart_event,
};
use dripcart_app::domain::{sessions::SessionState, shoppers::Shopper};

use crate::state::State;

/// Cart Response
///
/// The cart event that the next qualifying mutation would send, plus the lines
/// that can still be restored.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// Always `updated`
    #[salvo(schema(value_type = String))]
    pub event_action: EventAction,

    /// Current cart session token, empty when no session is active
    pub session: String,

    /// Shopper email, empty for guests
    pub customer_email: String,

    /// Cart lines keyed by cart item key
    #[salvo(schema(value_type = Object))]
    pub cart_data: CartData,

    /// Decimal string, or the number `0` for an empty cart
    #[salvo(schema(value_type = Object))]
    pub grand_total: GrandTotal,

    /// Discount total
    pub total_discounts: String,

    /// Tax total
    pub total_taxes: String,

    /// Fee total
    pub total_fees: String,

    /// Shipping total
    pub total_shipping: String,

    /// ISO currency code
    pub currency: String,

    /// Keys of removed lines that can be restored
    pub restorable: Vec<String>,
}

impl CartResponse {
    fn new(event: CartEvent, cart: &Cart) -> Self {
        Self {
            event_action: event.event_action,
            session: event.session,
            customer_email: event.customer_email,
            cart_data: event.cart_data,
            grand_total: event.grand_total,
            total_discounts: event.total_discounts,
            total_taxes: event.total_taxes,
            total_fees: event.total_fees,
            total_shipping: event.total_shipping,
            currency: event.currency,
            restorable: cart
                .removed_items()
                .iter()
                .map(CartItem::key)
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// Render a cart for a shopper using their current session, if any.
    pub(crate) async fn for_shopper(state: &State, shopper: &Shopper, cart: &Cart) -> Self {
        let session = match state.app.sessions.current(&shopper.id).await {
            SessionState::Active(record) => record.token.to_string(),
            SessionState::NoSession => String::new(),
        };

        let event = build_cart_event(cart, &shopper.email, &session, &state.app.store);

        Self::new(event, cart)
    }
}
