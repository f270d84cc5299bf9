//! Shopper extraction from requests.

use salvo::Request;

use dripcart_app::domain::shoppers::{Shopper, ShopperId};

/// Header carrying the logged in customer's email.
pub(crate) const CUSTOMER_EMAIL_HEADER: &str = "x-customer-email";

pub(crate) trait RequestShopperExt {
    /// The shopper a cart request acts for. Requests without an email are guests.
    fn shopper(&self, id: String) -> Shopper;
}

impl RequestShopperExt for Request {
    fn shopper(&self, id: String) -> Shopper {
        let id = ShopperId::new(id);

        match self.header::<String>(CUSTOMER_EMAIL_HEADER) {
            Some(email) if !email.trim().is_empty() => Shopper::new(id, email.trim()),
            _ => Shopper::guest(id),
        }
    }
}
