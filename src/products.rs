//! Products

use std::fmt;

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Product identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Wrap a raw product identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Category names attached to a product, in assignment order.
pub type Categories = SmallVec<[String; 2]>;

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Variation identifier, `None` for simple products
    pub variant_id: Option<ProductId>,

    /// Stock keeping unit
    pub sku: String,

    /// Product name
    pub name: String,

    /// Unit price
    pub price: Money<'static, Currency>,

    /// Unit tax
    pub tax: Money<'static, Currency>,

    /// Absolute product page URL
    pub permalink: String,

    /// Absolute product image URL, `None` when the product has no image
    pub image_url: Option<String>,

    /// Category names
    pub categories: Categories,
}

impl Product {
    /// Create an untaxed simple product with the given name and price.
    pub fn new(id: ProductId, name: impl Into<String>, price: Money<'static, Currency>) -> Self {
        Self {
            id,
            variant_id: None,
            sku: String::new(),
            name: name.into(),
            price,
            tax: Money::from_minor(0, price.currency()),
            permalink: String::new(),
            image_url: None,
            categories: Categories::new(),
        }
    }

    /// Set the SKU.
    #[must_use]
    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = sku.into();
        self
    }

    /// Set the product page URL.
    #[must_use]
    pub fn with_permalink(mut self, permalink: impl Into<String>) -> Self {
        self.permalink = permalink.into();
        self
    }

    /// Set the product image URL.
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Append a category name.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    /// Set the per-unit tax.
    #[must_use]
    pub fn with_tax(mut self, tax: Money<'static, Currency>) -> Self {
        self.tax = tax;
        self
    }

    /// Set the variation identifier.
    #[must_use]
    pub fn with_variant(mut self, variant_id: ProductId) -> Self {
        self.variant_id = Some(variant_id);
        self
    }

    /// Returns the variation identifier, falling back to the product identifier for
    /// simple products.
    pub fn variant_id(&self) -> ProductId {
        self.variant_id.unwrap_or(self.id)
    }

    /// Returns the currency the product is priced in.
    pub fn currency(&self) -> &'static Currency {
        self.price.currency()
    }
}
