//! Product Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ProductResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The list of products
    pub products: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Returns the store catalog.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .list_products()
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use dripcart_app::domain::products::MockProductsService;

    use crate::test_helpers::{gizmo, products_service, widget};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(products, Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn test_index_lists_catalog() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|| Ok(vec![widget(), gizmo()]));

        let mut res = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: ProductsResponse = res.take_json().await?;
        let names: Vec<_> = body.products.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, ["My Fair Widget", "My Fair Gizmo"]);

        let widget = body.products.first().ok_or("missing widget")?;

        assert_eq!(widget.price, "10.99");
        assert_eq!(widget.tax, "0.00");
        assert_eq!(widget.currency, "GBP");
        assert_eq!(widget.variant_id, 6);
        assert_eq!(widget.cart_item_key.len(), 32);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_empty_catalog() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|| Ok(Vec::new()));

        let body: ProductsResponse = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        assert!(body.products.is_empty(), "expected no products");

        Ok(())
    }
}
