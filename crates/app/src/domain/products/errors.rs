//! Products service errors.

use dripcart::products::ProductId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductsServiceError {
    #[error("product {0} already exists")]
    AlreadyExists(ProductId),

    #[error("product {0} not found")]
    NotFound(ProductId),

    #[error("product has currency {0}, but the store uses {1}")]
    CurrencyMismatch(&'static str, &'static str),
}
