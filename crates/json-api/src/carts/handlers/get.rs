//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    carts::{errors::into_status_error, models::CartResponse},
    extensions::*,
    state::State,
};

/// Get Cart Handler
///
/// Returns the shopper's cart rendered as a cart event. The session is empty
/// until the first qualifying mutation starts one.
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart preview"),
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
        .get_cart(shopper.id.clone())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartResponse::for_shopper(state, &shopper, &cart).await))
}
