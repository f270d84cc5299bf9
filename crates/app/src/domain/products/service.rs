//! Products service.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use dripcart::products::{Product, ProductId};
use mockall::automock;
use rusty_money::iso::Currency;

use crate::domain::products::errors::ProductsServiceError;

/// Store catalog held in memory, in creation order.
#[derive(Debug)]
pub struct InMemoryProductsService {
    currency: &'static Currency,
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductsService {
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            currency,
            products: RwLock::default(),
        }
    }

    /// Build a service preloaded with products.
    pub fn with_products(
        currency: &'static Currency,
        products: impl IntoIterator<Item = Product>,
    ) -> Result<Self, ProductsServiceError> {
        let service = Self::new(currency);

        for product in products {
            service.insert(product)?;
        }

        Ok(service)
    }

    fn insert(&self, product: Product) -> Result<Product, ProductsServiceError> {
        if product.currency() != self.currency {
            return Err(ProductsServiceError::CurrencyMismatch(
                product.currency().iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        let mut products = self.products.write().unwrap_or_else(PoisonError::into_inner);

        if products.iter().any(|existing| existing.id == product.id) {
            return Err(ProductsServiceError::AlreadyExists(product.id));
        }

        products.push(product.clone());

        Ok(product)
    }
}

#[async_trait]
impl ProductsService for InMemoryProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        Ok(self
            .products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn get_product(&self, product: ProductId) -> Result<Product, ProductsServiceError> {
        self.products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|candidate| candidate.id == product)
            .cloned()
            .ok_or(ProductsServiceError::NotFound(product))
    }

    async fn create_product(&self, product: Product) -> Result<Product, ProductsServiceError> {
        self.insert(product)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieve all products.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductId) -> Result<Product, ProductsServiceError>;

    /// Add a product to the catalog.
    async fn create_product(&self, product: Product) -> Result<Product, ProductsServiceError>;
}
