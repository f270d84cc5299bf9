//! App Router

use salvo::Router;

use crate::{carts, healthcheck, products, settings};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(
            Router::with_path("carts/{shopper}")
                .get(carts::get::handler)
                .delete(carts::empty::handler)
                .push(
                    Router::with_path("items")
                        .post(carts::items::create::handler)
                        .push(
                            Router::with_path("{key}")
                                .put(carts::items::update::handler)
                                .delete(carts::items::delete::handler)
                                .push(
                                    Router::with_path("restore")
                                        .post(carts::items::restore::handler),
                                ),
                        ),
                ),
        )
        .push(
            Router::with_path("settings/drip")
                .get(settings::get::handler)
                .push(Router::with_path("fields").get(settings::fields::handler))
                .push(Router::with_path("{option}").put(settings::update::handler)),
        )
}
