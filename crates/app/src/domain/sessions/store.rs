//! Session store.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashMap;

use crate::domain::{sessions::token::SessionToken, shoppers::ShopperId};

/// Session Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub token: SessionToken,
    pub started_at: Timestamp,
}

impl SessionRecord {
    #[must_use]
    pub fn start() -> Self {
        Self {
            token: SessionToken::generate(),
            started_at: Timestamp::now(),
        }
    }
}

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<FxHashMap<ShopperId, SessionRecord>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, shopper: &ShopperId) -> Option<SessionRecord> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(shopper)
            .cloned()
    }

    async fn get_or_start(&self, shopper: &ShopperId) -> SessionRecord {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(shopper.clone())
            .or_insert_with(SessionRecord::start)
            .clone()
    }

    async fn remove(&self, shopper: &ShopperId) -> Option<SessionRecord> {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(shopper)
    }
}

#[automock]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Retrieve the active session for a shopper, if any.
    async fn get(&self, shopper: &ShopperId) -> Option<SessionRecord>;

    /// Retrieve the active session, starting a new one when there is none.
    async fn get_or_start(&self, shopper: &ShopperId) -> SessionRecord;

    /// End the active session, returning it.
    async fn remove(&self, shopper: &ShopperId) -> Option<SessionRecord>;
}
