//! Product Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use dripcart::{items::CartItemKey, pricing::format_decimal, products::Product};

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// Product identifier
    pub id: u64,

    /// Variation identifier, equal to `id` for simple products
    pub variant_id: u64,

    /// Key of the cart line this product lands on
    pub cart_item_key: String,

    /// Stock keeping unit
    pub sku: String,

    /// Product name
    pub name: String,

    /// Unit price
    pub price: String,

    /// Unit tax
    pub tax: String,

    /// ISO currency code
    pub currency: String,

    /// Product page URL
    pub permalink: String,

    /// Product image URL, if the product has one
    pub image_url: Option<String>,

    /// Category names
    pub categories: Vec<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        let currency = product.currency();

        Self {
            id: product.id.get(),
            variant_id: product.variant_id().get(),
            cart_item_key: CartItemKey::for_product(&product).to_string(),
            price: format_decimal(*product.price.amount(), currency),
            tax: format_decimal(*product.tax.amount(), currency),
            currency: currency.iso_alpha_code.to_string(),
            sku: product.sku,
            name: product.name,
            permalink: product.permalink,
            image_url: product.image_url,
            categories: product.categories.into_vec(),
        }
    }
}
