//! Carts service errors.

use dripcart::{cart::CartError, items::CartItemKey, products::ProductId};
use thiserror::Error;

use crate::domain::{carts::hooks::HookError, products::ProductsServiceError};

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart item {0} not found")]
    NotFound(CartItemKey),

    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("product has currency {0}, but cart has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),

    #[error("product lookup failed")]
    Products(#[source] ProductsServiceError),

    #[error("cart hook failed")]
    Hook(#[from] HookError),
}

impl From<CartError> for CartsServiceError {
    fn from(error: CartError) -> Self {
        match error {
            CartError::InvalidQuantity => Self::InvalidQuantity,
            CartError::ItemNotFound(key) => Self::NotFound(key),
            CartError::CurrencyMismatch(product, cart) => Self::CurrencyMismatch(product, cart),
        }
    }
}

impl From<ProductsServiceError> for CartsServiceError {
    fn from(error: ProductsServiceError) -> Self {
        match error {
            ProductsServiceError::NotFound(product) => Self::ProductNotFound(product),
            ProductsServiceError::CurrencyMismatch(product, store) => {
                Self::CurrencyMismatch(product, store)
            }
            ProductsServiceError::AlreadyExists(_) => Self::Products(error),
        }
    }
}
