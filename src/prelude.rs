//! Dripcart prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartAdjustments, CartError, CartMutation},
    events::{CartData, CartEvent, EventAction, GrandTotal, LineItem},
    items::{CartItem, CartItemKey, CartItemKeyError},
    payload::{StoreContext, build_cart_event},
    products::{Product, ProductId},
};
