//! Restore Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    carts::{errors::into_status_error, items::parse_key, models::CartResponse},
    extensions::*,
    state::State,
};

/// Restore Cart Item Handler
///
/// Puts a removed line back into the cart. Restoring does not send a cart event.
#[endpoint(
    tags("carts"),
    summary = "Restore Cart Item",
    responses(
        (status_code = StatusCode::OK, description = "Cart item restored"),
        (status_code = StatusCode::NOT_FOUND, description = "No removed item with this key"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    shopper: PathParam<String>,
    key: PathParam<String>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let shopper = req.shopper(shopper.into_inner());
    let key = parse_key(key)?;

    let cart = state
        .app
        .carts
        .restore_item(shopper.clone(), key)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartResponse::for_shopper(state, &shopper, &cart).await))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use dripcart::{cart::Cart, items::CartItemKey};
    use dripcart_app::domain::carts::MockCartsService;

    use crate::test_helpers::{carts_service, widget};

    use super::*;

    #[tokio::test]
    async fn test_restore_returns_line_to_cart() -> TestResult {
        let mut carts = MockCartsService::new();
        let key = CartItemKey::for_product(&widget());
        let expected = key.clone();
        let mut cart = Cart::new(iso::GBP);

        cart.add(widget(), 1)?;

        carts
            .expect_restore_item()
            .once()
            .withf(move |_, k| *k == expected)
            .return_once(move |_, _| Ok(cart));

        let mut res = TestClient::post(format!(
            "http://example.com/carts/shopper-1/items/{key}/restore"
        ))
        .send(&carts_service(
            carts,
            Router::with_path("carts/{shopper}/items/{key}/restore").post(handler),
        ))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Value = res.take_json().await?;

        assert_eq!(body["cart_data"][key.as_str()]["quantity"], json!(1));
        assert_eq!(body["restorable"], json!([]));

        Ok(())
    }
}
