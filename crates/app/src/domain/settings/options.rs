//! Options store.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;

#[derive(Debug, Default)]
pub struct InMemoryOptionsStore {
    options: RwLock<FxHashMap<String, String>>,
}

impl InMemoryOptionsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OptionsStore for InMemoryOptionsStore {
    async fn get_option(&self, key: &str) -> Option<String> {
        self.options
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    async fn update_option(&self, key: &str, value: String) {
        self.options
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
    }

    async fn delete_option(&self, key: &str) -> bool {
        self.options
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
            .is_some()
    }
}

/// Key/value store for plugin options.
#[automock]
#[async_trait]
pub trait OptionsStore: Send + Sync {
    async fn get_option(&self, key: &str) -> Option<String>;

    async fn update_option(&self, key: &str, value: String);

    /// Returns whether the option existed.
    async fn delete_option(&self, key: &str) -> bool;
}
