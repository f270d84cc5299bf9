//! Dripcart
//!
//! Dripcart turns a shopper's cart into the cart event payload consumed by Drip's
//! WooCommerce integration: line items, totals and the cart session identity.

pub mod cart;
pub mod events;
pub mod items;
pub mod payload;
pub mod prelude;
pub mod pricing;
pub mod products;
