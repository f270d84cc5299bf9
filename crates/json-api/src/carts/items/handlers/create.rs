//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use dripcart::products::ProductId;

use crate::{
    carts::{errors::into_status_error, models::CartResponse},
    extensions::*,
    state::State,
};

fn default_quantity() -> u32 {
    1
}

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    /// Product to add
    pub product_id: u64,

    /// Units to add, defaults to 1
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

/// Add Cart Item Handler
///
/// Adds units of a product to the shopper's cart and reports the cart.
#[endpoint(
    tags("carts"),
    summary = "Add Item to Cart",
    responses(
        (status_code = StatusCode::CREATED, description = "Item added"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::CONFLICT, description = "Currency mismatch"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    shopper: PathParam<String>,
    json: JsonBody<AddCartItemRequest>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let shopper = req.shopper(shopper.into_inner());
    let request = json.into_inner();
    let product = ProductId::new(request.product_id);

    let cart = state
        .app
        .carts
        .add_item(shopper.clone(), product, request.quantity)
        .await
        .map_err(into_status_error)?;

    if let Some(item) = cart.items().iter().find(|item| item.product().id == product) {
        res.add_header(
            LOCATION,
            format!("/carts/{}/items/{}", shopper.id, item.key()),
            true,
        )
        .or_500("failed to set location header")?;
    }

    res.status_code(StatusCode::CREATED);

    Ok(Json(CartResponse::for_shopper(state, &shopper, &cart).await))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use dripcart::{cart::Cart, items::CartItemKey};
    use dripcart_app::domain::carts::{CartsServiceError, MockCartsService};

    use crate::{
        extensions::CUSTOMER_EMAIL_HEADER,
        test_helpers::{carts_service, widget},
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("carts/{shopper}/items").post(handler))
    }

    #[tokio::test]
    async fn test_add_returns_201_with_location() -> TestResult {
        let mut carts = MockCartsService::new();
        let mut cart = Cart::new(iso::GBP);

        cart.add(widget(), 1)?;

        carts
            .expect_add_item()
            .once()
            .withf(|shopper, product, quantity| {
                shopper.id.as_str() == "shopper-1"
                    && shopper.email == "myfairuser@example.com"
                    && *product == ProductId::new(6)
                    && *quantity == 1
            })
            .return_once(move |_, _, _| Ok(cart));

        let mut res = TestClient::post("http://example.com/carts/shopper-1/items")
            .add_header(CUSTOMER_EMAIL_HEADER, "myfairuser@example.com", true)
            .json(&json!({ "product_id": 6 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let key = CartItemKey::for_product(&widget());

        assert_eq!(
            res.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
            Some(format!("/carts/shopper-1/items/{key}").as_str())
        );

        let body: Value = res.take_json().await?;

        assert_eq!(body["grand_total"], json!("10.99"));
        assert_eq!(body["cart_data"][key.as_str()]["quantity"], json!(1));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_passes_explicit_quantity() {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(|_, _, quantity| *quantity == 3)
            .return_once(|_, _, _| Ok(Cart::new(iso::GBP)));

        let res = TestClient::post("http://example.com/carts/shopper-1/items")
            .json(&json!({ "product_id": 6, "quantity": 3 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
    }

    #[tokio::test]
    async fn test_add_unknown_product_returns_404() {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, product, _| Err(CartsServiceError::ProductNotFound(product)));

        let res = TestClient::post("http://example.com/carts/shopper-1/items")
            .json(&json!({ "product_id": 404 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_add_zero_quantity_returns_400() {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::InvalidQuantity));

        let res = TestClient::post("http://example.com/carts/shopper-1/items")
            .json(&json!({ "product_id": 6, "quantity": 0 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
