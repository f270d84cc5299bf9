//! Product catalog files.
//!
//! A catalog is a YAML list of products, loaded once at start up:
//!
//! ```yaml
//! products:
//!   - id: 6
//!     slug: fair-widget
//!     sku: fair-widg-12345
//!     name: My Fair Widget
//!     price: 10.99 GBP
//!     categories: [my fair category]
//! ```

use std::{fs, path::Path, str::FromStr};

use dripcart::products::{Product, ProductId};
use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog")]
    Yaml(#[from] serde_norway::Error),

    #[error("invalid price format: {0}")]
    InvalidPrice(String),

    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    #[error("currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),
}

#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    pub products: Vec<CatalogProduct>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogProduct {
    pub id: u64,

    #[serde(default)]
    pub variant_id: Option<u64>,

    pub slug: String,

    #[serde(default)]
    pub sku: String,

    pub name: String,

    /// Amount and ISO currency code, e.g. `10.99 GBP`
    pub price: String,

    #[serde(default)]
    pub tax: Option<String>,

    /// Absolute URL, or a path relative to the site
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub categories: Vec<String>,
}

/// Load a catalog file into products for the given site and store currency.
pub fn load_catalog(
    path: impl AsRef<Path>,
    site_url: &str,
    currency: &'static Currency,
) -> Result<Vec<Product>, CatalogError> {
    let contents = fs::read_to_string(path)?;

    parse_catalog(&contents, site_url, currency)
}

/// Parse catalog YAML into products.
pub fn parse_catalog(
    yaml: &str,
    site_url: &str,
    currency: &'static Currency,
) -> Result<Vec<Product>, CatalogError> {
    let catalog: CatalogFile = serde_norway::from_str(yaml)?;
    let site_url = site_url.trim_end_matches('/');

    catalog
        .products
        .into_iter()
        .map(|entry| entry.into_product(site_url, currency))
        .collect()
}

impl CatalogProduct {
    fn into_product(
        self,
        site_url: &str,
        currency: &'static Currency,
    ) -> Result<Product, CatalogError> {
        let price = parse_price(&self.price, currency)?;

        let tax = match &self.tax {
            Some(tax) => parse_price(tax, currency)?,
            None => Money::from_minor(0, currency),
        };

        let mut product = Product::new(ProductId::new(self.id), self.name, price)
            .with_sku(self.sku)
            .with_permalink(format!("{site_url}/?product={}", self.slug))
            .with_tax(tax);

        if let Some(variant) = self.variant_id {
            product = product.with_variant(ProductId::new(variant));
        }

        if let Some(image) = self.image {
            product = product.with_image_url(absolute_url(site_url, &image));
        }

        for category in self.categories {
            product = product.with_category(category);
        }

        Ok(product)
    }
}

/// Parse a price such as `10.99 GBP`, requiring the store currency.
pub fn parse_price(
    value: &str,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, CatalogError> {
    let mut parts = value.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CatalogError::InvalidPrice(value.to_string()));
    };

    let found = iso::find(code).ok_or_else(|| CatalogError::UnknownCurrency(code.to_string()))?;

    if found != currency {
        return Err(CatalogError::CurrencyMismatch(
            currency.iso_alpha_code.to_string(),
            found.iso_alpha_code.to_string(),
        ));
    }

    let amount =
        Decimal::from_str(amount).map_err(|error| CatalogError::InvalidPrice(error.to_string()))?;

    if amount.is_sign_negative() {
        return Err(CatalogError::InvalidPrice(value.to_string()));
    }

    Ok(Money::from_decimal(amount, currency))
}

fn absolute_url(site_url: &str, image: &str) -> String {
    if image.starts_with("http://") || image.starts_with("https://") {
        image.to_string()
    } else {
        format!("{site_url}/{}", image.trim_start_matches('/'))
    }
}
