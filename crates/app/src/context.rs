//! App Context

use std::sync::Arc;

use dripcart::{payload::StoreContext, products::Product};
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::domain::{
    carts::{CartEventObserver, CartHooks, CartsService, InMemoryCartsService},
    products::{InMemoryProductsService, ProductsService, ProductsServiceError},
    sessions::{InMemorySessionStore, SessionTracker},
    settings::{DripSettings, InMemoryOptionsStore, SettingsRegistrar},
    webhooks::{
        HookshotConfig, HttpWebhookTransport, NewWebhook, WebhookDispatcher, WebhookRegistry,
        WebhookTransport,
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to load products")]
    Products(#[from] ProductsServiceError),
}

/// Store configuration the application is built from.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub currency: &'static Currency,
    pub hookshot: HookshotConfig,
    pub products: Vec<Product>,
    pub webhook: Option<NewWebhook>,
}

#[derive(Clone)]
pub struct AppContext {
    pub carts: Arc<dyn CartsService>,
    pub products: Arc<dyn ProductsService>,
    pub sessions: SessionTracker,
    pub settings: DripSettings,
    pub webhooks: Arc<WebhookRegistry>,
    pub store: StoreContext,
}

impl AppContext {
    /// Build application context delivering webhooks over HTTP.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured products cannot be loaded.
    pub fn new(config: AppConfig) -> Result<Self, AppInitError> {
        let transport = Arc::new(HttpWebhookTransport::new(config.hookshot.clone()));

        Self::with_transport(config, transport)
    }

    /// Build application context around a given webhook transport.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured products cannot be loaded.
    pub fn with_transport(
        config: AppConfig,
        transport: Arc<dyn WebhookTransport>,
    ) -> Result<Self, AppInitError> {
        let store = StoreContext::for_site(&config.hookshot.site_url);

        let products: Arc<dyn ProductsService> = Arc::new(InMemoryProductsService::with_products(
            config.currency,
            config.products,
        )?);

        let webhooks = Arc::new(WebhookRegistry::new());

        if let Some(webhook) = config.webhook {
            webhooks.create(webhook);
        }

        let sessions = SessionTracker::new(Arc::new(InMemorySessionStore::new()));

        let observer = Arc::new(CartEventObserver::new(
            sessions.clone(),
            WebhookDispatcher::new(webhooks.clone(), transport),
            store.clone(),
        ));

        let mut hooks = CartHooks::new();

        observer.register(&mut hooks);

        Ok(Self {
            carts: Arc::new(InMemoryCartsService::new(
                config.currency,
                products.clone(),
                hooks,
            )),
            products,
            sessions,
            settings: DripSettings::new(
                Arc::new(InMemoryOptionsStore::new()),
                SettingsRegistrar::new(),
            ),
            webhooks,
            store,
        })
    }
}
