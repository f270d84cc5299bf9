//! Server configuration module

use clap::Parser;
use rusty_money::iso::{self, Currency};
use thiserror::Error;

use dripcart_app::{
    context::AppConfig,
    domain::{
        products::catalog::{CatalogError, load_catalog},
        webhooks::{HookshotConfig, WebhookError},
    },
};

use crate::config::{
    logging::LoggingConfig, server::ServerRuntimeConfig, store::StoreConfig,
    webhook::WebhookConfig,
};

pub(crate) mod logging;
pub(crate) mod server;
pub(crate) mod store;
pub(crate) mod webhook;

/// Errors raised while turning the server configuration into an app configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `STORE_CURRENCY` is not an ISO 4217 code.
    #[error("unknown store currency {0:?}")]
    UnknownCurrency(String),

    /// The product catalog could not be loaded.
    #[error("failed to load product catalog: {0}")]
    Catalog(#[from] CatalogError),

    /// The cart webhook could not be described.
    #[error("invalid webhook configuration: {0}")]
    Webhook(#[from] WebhookError),
}

/// Dripcart JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "dripcart-json", about = "Dripcart JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Store settings.
    #[command(flatten)]
    pub store: StoreConfig,

    /// Cart webhook settings.
    #[command(flatten)]
    pub webhook: WebhookConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Store currency.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured code is not a known currency.
    pub fn currency(&self) -> Result<&'static Currency, ConfigError> {
        let code = self.store.store_currency.trim().to_uppercase();

        iso::find(&code).ok_or(ConfigError::UnknownCurrency(code))
    }

    /// Build the application configuration, loading the catalog if one is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the currency is unknown, the catalog cannot be loaded or
    /// the webhook topic is malformed.
    pub fn app_config(&self) -> Result<AppConfig, ConfigError> {
        let currency = self.currency()?;

        let products = match &self.store.catalog_path {
            Some(path) => load_catalog(path, &self.store.store_url, currency)?,
            None => Vec::new(),
        };

        Ok(AppConfig {
            currency,
            hookshot: HookshotConfig {
                site_url: self.store.store_url.clone(),
                woocommerce_version: self.store.woocommerce_version.clone(),
                wordpress_version: self.store.wordpress_version.clone(),
            },
            products,
            webhook: self.webhook.new_webhook()?,
        })
    }
}
