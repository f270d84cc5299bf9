//! Carts service.

use std::{
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

use async_trait::async_trait;
use dripcart::{
    cart::{Cart, CartError, CartMutation},
    items::CartItemKey,
    products::ProductId,
};
use mockall::automock;
use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;

use crate::domain::{
    carts::{errors::CartsServiceError, hooks::CartHooks, models::CartChange},
    products::ProductsService,
    shoppers::{Shopper, ShopperId},
};

/// Shopper carts held in memory.
///
/// Every mutation fires the cart hooks with the updated cart once the cart lock
/// has been released.
pub struct InMemoryCartsService {
    currency: &'static Currency,
    products: Arc<dyn ProductsService>,
    hooks: CartHooks,
    carts: Mutex<FxHashMap<ShopperId, Cart>>,
}

impl fmt::Debug for InMemoryCartsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryCartsService")
            .field("currency", &self.currency.iso_alpha_code)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}

impl InMemoryCartsService {
    pub fn new(
        currency: &'static Currency,
        products: Arc<dyn ProductsService>,
        hooks: CartHooks,
    ) -> Self {
        Self {
            currency,
            products,
            hooks,
            carts: Mutex::default(),
        }
    }

    /// Apply a mutation under the cart lock, then fire hooks on the snapshot.
    ///
    /// Hooks run after the lock is released, so changes for one shopper are assumed
    /// to arrive one at a time; concurrent changes may report out of order.
    async fn mutate(
        &self,
        shopper: Shopper,
        apply: impl FnOnce(&mut Cart) -> Result<CartMutation, CartError>,
    ) -> Result<Cart, CartsServiceError> {
        let (cart, mutation) = {
            let mut carts = self.carts.lock().unwrap_or_else(PoisonError::into_inner);

            let cart = carts
                .entry(shopper.id.clone())
                .or_insert_with(|| Cart::new(self.currency));

            let mutation = apply(cart)?;

            (cart.clone(), mutation)
        };

        let change = CartChange {
            shopper,
            cart,
            mutation,
        };

        self.hooks.fire(&change).await?;

        Ok(change.cart)
    }
}

#[async_trait]
impl CartsService for InMemoryCartsService {
    async fn get_cart(&self, shopper: ShopperId) -> Result<Cart, CartsServiceError> {
        Ok(self
            .carts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&shopper)
            .cloned()
            .unwrap_or_else(|| Cart::new(self.currency)))
    }

    async fn add_item(
        &self,
        shopper: Shopper,
        product: ProductId,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let product = self.products.get_product(product).await?;

        self.mutate(shopper, |cart| cart.add(product, quantity)).await
    }

    async fn remove_item(
        &self,
        shopper: Shopper,
        key: CartItemKey,
    ) -> Result<Cart, CartsServiceError> {
        self.mutate(shopper, |cart| cart.remove(&key)).await
    }

    async fn restore_item(
        &self,
        shopper: Shopper,
        key: CartItemKey,
    ) -> Result<Cart, CartsServiceError> {
        self.mutate(shopper, |cart| cart.restore(&key)).await
    }

    async fn update_quantity(
        &self,
        shopper: Shopper,
        key: CartItemKey,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError> {
        self.mutate(shopper, |cart| cart.set_quantity(&key, quantity))
            .await
    }

    async fn empty_cart(&self, shopper: Shopper) -> Result<Cart, CartsServiceError> {
        self.mutate(shopper, |cart| Ok(cart.empty())).await
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve a shopper's cart, empty if they have none yet.
    async fn get_cart(&self, shopper: ShopperId) -> Result<Cart, CartsServiceError>;

    /// Add units of a product to the shopper's cart.
    async fn add_item(
        &self,
        shopper: Shopper,
        product: ProductId,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError>;

    /// Remove a line, keeping it restorable.
    async fn remove_item(
        &self,
        shopper: Shopper,
        key: CartItemKey,
    ) -> Result<Cart, CartsServiceError>;

    /// Put a removed line back.
    async fn restore_item(
        &self,
        shopper: Shopper,
        key: CartItemKey,
    ) -> Result<Cart, CartsServiceError>;

    /// Change the quantity of a line. Zero removes it.
    async fn update_quantity(
        &self,
        shopper: Shopper,
        key: CartItemKey,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError>;

    /// Drop every line of the shopper's cart.
    async fn empty_cart(&self, shopper: Shopper) -> Result<Cart, CartsServiceError>;
}
