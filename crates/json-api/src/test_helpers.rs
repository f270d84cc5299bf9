//! Test helpers.

use std::sync::Arc;

use rusty_money::{Money, iso};
use salvo::{affix_state::inject, prelude::*};

use dripcart::{
    payload::StoreContext,
    products::{Product, ProductId},
};
use dripcart_app::{
    context::AppContext,
    domain::{
        carts::MockCartsService,
        products::MockProductsService,
        sessions::{InMemorySessionStore, SessionTracker},
        settings::{DripSettings, InMemoryOptionsStore, SettingsRegistrar},
        webhooks::WebhookRegistry,
    },
};

use crate::state::State;

pub(crate) const TEST_SITE_URL: &str = "http://localhost:3007";

pub(crate) fn widget() -> Product {
    Product::new(ProductId::new(6), "My Fair Widget", Money::from_minor(1099, iso::GBP))
        .with_sku("fair-widg-12345")
        .with_permalink(format!("{TEST_SITE_URL}/?product=fair-widget"))
        .with_category("my fair category")
}

pub(crate) fn gizmo() -> Product {
    Product::new(ProductId::new(7), "My Fair Gizmo", Money::from_minor(1111, iso::GBP))
        .with_sku("fair-gzmo-67890")
        .with_permalink(format!("{TEST_SITE_URL}/?product=fair-gizmo"))
        .with_category("my fair category")
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_cart().never();
    carts.expect_add_item().never();
    carts.expect_remove_item().never();
    carts.expect_restore_item().never();
    carts.expect_update_quantity().never();
    carts.expect_empty_cart().never();

    carts
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();

    products
}

fn app_context(carts: MockCartsService, products: MockProductsService) -> AppContext {
    AppContext {
        carts: Arc::new(carts),
        products: Arc::new(products),
        sessions: SessionTracker::new(Arc::new(InMemorySessionStore::new())),
        settings: DripSettings::new(
            Arc::new(InMemoryOptionsStore::new()),
            SettingsRegistrar::new(),
        ),
        webhooks: Arc::new(WebhookRegistry::new()),
        store: StoreContext::for_site(TEST_SITE_URL),
    }
}

/// State whose carts and products services fail the test if they are called.
pub(crate) fn state_with_mocks() -> Arc<State> {
    State::from_app_context(app_context(strict_carts_mock(), strict_products_mock()))
}

pub(crate) fn service_with_state(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    service_with_state(
        State::from_app_context(app_context(carts, strict_products_mock())),
        route,
    )
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    service_with_state(
        State::from_app_context(app_context(strict_carts_mock(), products)),
        route,
    )
}
