//! Store Config

use std::path::PathBuf;

use clap::Args;

/// Settings of the store whose carts are reported.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// Public site URL, used for product links, images and the webhook source
    #[arg(long, env = "STORE_URL", default_value = "http://localhost:3007")]
    pub store_url: String,

    /// ISO 4217 code of the store currency
    #[arg(long, env = "STORE_CURRENCY", default_value = "GBP")]
    pub store_currency: String,

    /// YAML product catalog to load at startup
    #[arg(long, env = "CATALOG_PATH")]
    pub catalog_path: Option<PathBuf>,

    /// WooCommerce version reported in the webhook user agent
    #[arg(long, env = "WOOCOMMERCE_VERSION", default_value = "3.5.4")]
    pub woocommerce_version: String,

    /// WordPress version reported in the webhook user agent
    #[arg(long, env = "WORDPRESS_VERSION", default_value = "5.0.3")]
    pub wordpress_version: String,
}
