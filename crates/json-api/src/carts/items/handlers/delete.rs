//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    carts::{errors::into_status_error, items::parse_key, models::CartResponse},
    extensions::*,
    state::State,
};

/// Remove Cart Item Handler
///
/// Removes a cart line. The line stays restorable until the cart is emptied or
/// the product is added again.
#[endpoint(
    tags("carts"),
    summary = "Remove Cart Item",
    responses(
        (status_code = StatusCode::OK, description = "Cart item removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart item not found"),
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
        .remove_item(shopper.clone(), key)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartResponse::for_shopper(state, &shopper, &cart).await))
}
