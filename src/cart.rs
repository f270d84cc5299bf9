//! Cart

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    items::{CartItem, CartItemKey},
    products::Product,
};

/// Errors related to cart mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A quantity of zero was requested where at least one unit is required.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// No line with the given key exists.
    #[error("cart item {0} not found")]
    ItemNotFound(CartItemKey),

    /// A product's currency differs from the cart currency (product currency, cart currency).
    #[error("product has currency {0}, but cart has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),
}

/// The transition a mutation applied to a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartMutation {
    /// A product was added; `quantity` is the resulting line quantity.
    ItemAdded {
        /// Line key
        key: CartItemKey,

        /// Line quantity after the add
        quantity: u32,
    },

    /// A line was removed and can be restored.
    ItemRemoved {
        /// Line key
        key: CartItemKey,
    },

    /// A previously removed line was put back.
    ItemRestored {
        /// Line key
        key: CartItemKey,
    },

    /// A line quantity changed to a non-zero value.
    QuantityUpdated {
        /// Line key
        key: CartItemKey,

        /// Quantity before the update
        from: u32,

        /// Quantity after the update
        to: u32,
    },

    /// Every line was dropped.
    Emptied {
        /// Number of lines in the cart before it was emptied
        lines: usize,
    },
}

/// Cart-level amounts that are not derived from lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartAdjustments {
    /// Discount total
    pub discounts: Money<'static, Currency>,

    /// Fee total
    pub fees: Money<'static, Currency>,

    /// Shipping total
    pub shipping: Money<'static, Currency>,
}

impl CartAdjustments {
    /// No discounts, fees or shipping.
    pub fn zero(currency: &'static Currency) -> Self {
        Self {
            discounts: Money::from_minor(0, currency),
            fees: Money::from_minor(0, currency),
            shipping: Money::from_minor(0, currency),
        }
    }
}

/// Cart
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
    removed: Vec<CartItem>,
    currency: &'static Currency,
    adjustments: CartAdjustments,
}

impl Cart {
    /// Create an empty cart in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            removed: Vec::new(),
            currency,
            adjustments: CartAdjustments::zero(currency),
        }
    }

    /// Add `quantity` units of a product.
    ///
    /// Adding a product that is already in the cart increases the quantity of the
    /// existing line.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` is zero.
    /// - [`CartError::CurrencyMismatch`]: the product is priced in another currency.
    pub fn add(&mut self, product: Product, quantity: u32) -> Result<CartMutation, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        if product.currency() != self.currency {
            return Err(CartError::CurrencyMismatch(
                product.currency().iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        let key = CartItemKey::for_product(&product);

        self.removed.retain(|item| item.key() != &key);

        let quantity = match self.items.iter_mut().find(|item| item.key() == &key) {
            Some(item) => {
                let quantity = item.quantity().saturating_add(quantity);
                item.set_quantity(quantity);
                quantity
            }
            None => {
                self.items.push(CartItem::new(product, quantity));
                quantity
            }
        };

        Ok(CartMutation::ItemAdded { key, quantity })
    }

    /// Remove a line, keeping it around so it can be restored.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if there is no such line.
    pub fn remove(&mut self, key: &CartItemKey) -> Result<CartMutation, CartError> {
        let position = self
            .position(key)
            .ok_or_else(|| CartError::ItemNotFound(key.clone()))?;

        let item = self.items.remove(position);

        self.removed.retain(|removed| removed.key() != key);
        self.removed.push(item);

        Ok(CartMutation::ItemRemoved { key: key.clone() })
    }

    /// Put a removed line back at the end of the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if the line was not removed.
    pub fn restore(&mut self, key: &CartItemKey) -> Result<CartMutation, CartError> {
        let position = self
            .removed
            .iter()
            .position(|item| item.key() == key)
            .ok_or_else(|| CartError::ItemNotFound(key.clone()))?;

        let item = self.removed.remove(position);

        match self.position(key) {
            Some(existing) => {
                if let Some(slot) = self.items.get_mut(existing) {
                    *slot = item;
                }
            }
            None => self.items.push(item),
        }

        Ok(CartMutation::ItemRestored { key: key.clone() })
    }

    /// Set the quantity of a line. A quantity of zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if there is no such line.
    pub fn set_quantity(
        &mut self,
        key: &CartItemKey,
        quantity: u32,
    ) -> Result<CartMutation, CartError> {
        if quantity == 0 {
            return self.remove(key);
        }

        let item = self
            .items
            .iter_mut()
            .find(|item| item.key() == key)
            .ok_or_else(|| CartError::ItemNotFound(key.clone()))?;

        let from = item.quantity();

        item.set_quantity(quantity);

        Ok(CartMutation::QuantityUpdated {
            key: key.clone(),
            from,
            to: quantity,
        })
    }

    /// Drop every line, including removed lines.
    pub fn empty(&mut self) -> CartMutation {
        let lines = self.items.len();

        self.items.clear();
        self.removed.clear();

        CartMutation::Emptied { lines }
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Lines that were removed and can still be restored.
    pub fn removed_items(&self) -> &[CartItem] {
        &self.removed
    }

    /// Look up a line by key.
    pub fn get(&self, key: &CartItemKey) -> Option<&CartItem> {
        self.items.iter().find(|item| item.key() == key)
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Get the cart-level discount, fee and shipping amounts.
    pub fn adjustments(&self) -> &CartAdjustments {
        &self.adjustments
    }

    /// Replace the cart-level discount, fee and shipping amounts.
    pub fn set_adjustments(&mut self, adjustments: CartAdjustments) {
        self.adjustments = adjustments;
    }

    fn position(&self, key: &CartItemKey) -> Option<usize> {
        self.items.iter().position(|item| item.key() == key)
    }
}
