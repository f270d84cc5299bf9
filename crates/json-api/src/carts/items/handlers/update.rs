//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    carts::{errors::into_status_error, items::parse_key, models::CartResponse},
    extensions::*,
    state::State,
};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    /// New line quantity; zero removes the line
    pub quantity: u32,
}

/// Update Cart Item Handler
///
/// Sets the quantity of a cart line.
#[endpoint(
    tags("carts"),
    summary = "Update Cart Item Quantity",
    responses(
        (status_code = StatusCode::OK, description = "Quantity updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart item not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    shopper: PathParam<String>,
    key: PathParam<String>,
    json: JsonBody<UpdateCartItemRequest>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let shopper = req.shopper(shopper.into_inner());
    let key = parse_key(key)?;

    let cart = state
        .app
        .carts
        .update_quantity(shopper.clone(), key, json.into_inner().quantity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartResponse::for_shopper(state, &shopper, &cart).await))
}
