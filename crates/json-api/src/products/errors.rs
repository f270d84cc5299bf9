//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use dripcart_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::NotFound(product) => {
            StatusError::not_found().brief(format!("Product {product} not found"))
        }
        ProductsServiceError::AlreadyExists(product) => {
            StatusError::conflict().brief(format!("Product {product} already exists"))
        }
        ProductsServiceError::CurrencyMismatch(product, store) => {
            error!("product priced in {product} in a {store} store");

            StatusError::internal_server_error()
        }
    }
}
