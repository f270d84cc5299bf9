//! Cart Items

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::{
    pricing::line_amount,
    products::{Product, ProductId},
};

/// Number of hex characters in a cart item key.
pub const CART_ITEM_KEY_LEN: usize = 32;

/// Errors that can occur while parsing a cart item key.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartItemKeyError {
    /// The key does not have the expected length.
    #[error("cart item key must be {CART_ITEM_KEY_LEN} characters, got {0}")]
    InvalidLength(usize),

    /// The key contains characters outside of lowercase hex.
    #[error("cart item key must be lowercase hex")]
    InvalidCharacter,
}

/// Cart item key
///
/// Derived from the product and variation identifiers, so adding the same product
/// twice lands on the same cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CartItemKey(String);

impl CartItemKey {
    /// Derive the key for a product.
    pub fn for_product(product: &Product) -> Self {
        let variation = product.variant_id.map_or(0, ProductId::get);
        let digest = Sha256::digest(format!("{}_{variation}", product.id).as_bytes());

        let mut key = String::with_capacity(CART_ITEM_KEY_LEN);

        for byte in digest.iter().take(CART_ITEM_KEY_LEN / 2) {
            for nibble in [byte >> 4, byte & 0x0f] {
                key.push(char::from_digit(u32::from(nibble), 16).unwrap_or('0'));
            }
        }

        Self(key)
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CartItemKey {
    type Err = CartItemKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.len() != CART_ITEM_KEY_LEN {
            return Err(CartItemKeyError::InvalidLength(value.len()));
        }

        if !value.bytes().all(|byte| matches!(byte, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(CartItemKeyError::InvalidCharacter);
        }

        Ok(Self(value.to_string()))
    }
}

impl TryFrom<String> for CartItemKey {
    type Error = CartItemKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CartItemKey> for String {
    fn from(key: CartItemKey) -> Self {
        key.0
    }
}

impl fmt::Display for CartItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A product line in a cart
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    key: CartItemKey,
    product: Product,
    quantity: u32,
}

impl CartItem {
    /// Creates a new cart line for the given product.
    pub fn new(product: Product, quantity: u32) -> Self {
        Self {
            key: CartItemKey::for_product(&product),
            product,
            quantity,
        }
    }

    /// Returns the line key.
    pub fn key(&self) -> &CartItemKey {
        &self.key
    }

    /// Returns the product on this line.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Returns the line quantity.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    /// Unit price multiplied by quantity.
    pub fn line_total(&self) -> f64 {
        line_amount(&self.product.price, self.quantity)
    }

    /// Unit tax multiplied by quantity.
    pub fn line_tax(&self) -> f64 {
        line_amount(&self.product.tax, self.quantity)
    }
}
