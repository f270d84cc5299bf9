//! Empty Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    carts::{errors::into_status_error, models::CartResponse},
    extensions::*,
    state::State,
};

/// Empty Cart Handler
///
/// Drops every line of the shopper's cart. If a session was active, the emptied
/// cart is reported and the session ends.
#[endpoint(
    tags("carts"),
    summary = "Empty Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart emptied"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    shopper: PathParam<String>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let shopper = req.shopper(shopper.into_inner());

    let cart = state
        .app
        .carts
        .empty_cart(shopper.clone())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartResponse::for_shopper(state, &shopper, &cart).await))
}
