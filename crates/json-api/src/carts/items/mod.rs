//! Cart Items

use salvo::{oapi::extract::PathParam, prelude::StatusError};

use dripcart::items::CartItemKey;

use crate::extensions::*;

pub(crate) mod handlers;

pub(crate) use handlers::*;

fn parse_key(key: PathParam<String>) -> Result<CartItemKey, StatusError> {
    key.into_inner()
        .parse::<CartItemKey>()
        .or_400("invalid cart item key")
}
