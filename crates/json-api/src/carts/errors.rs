//! Errors

use salvo::http::StatusError;
use tracing::error;

use dripcart_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound(key) => {
            StatusError::not_found().brief(format!("Cart item {key} not found"))
        }
        CartsServiceError::ProductNotFound(product) => {
            StatusError::not_found().brief(format!("Product {product} not found"))
        }
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be at least 1")
        }
        CartsServiceError::CurrencyMismatch(product, cart) => StatusError::conflict().brief(
            format!("Product is priced in {product}, but the cart uses {cart}"),
        ),
        CartsServiceError::Products(source) => {
            error!("failed to look up product: {source}");

            StatusError::internal_server_error()
        }
        CartsServiceError::Hook(source) => {
            error!("cart hook failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
