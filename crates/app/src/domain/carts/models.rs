//! Cart Models

use dripcart::cart::{Cart, CartMutation};

use crate::domain::{carts::hooks::CartHook, shoppers::Shopper};

/// A mutation applied to a shopper's cart, with the cart as it is afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CartChange {
    pub shopper: Shopper,
    pub cart: Cart,
    pub mutation: CartMutation,
}

impl CartChange {
    #[must_use]
    pub fn hook(&self) -> CartHook {
        CartHook::from(&self.mutation)
    }
}
