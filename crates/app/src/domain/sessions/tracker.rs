//! Session tracker.
//!
//! A shopper is either without a session or has an active one. The first cart
//! event starts a session, later events reuse its token, and emptying the cart
//! ends it so the next cart gets a new token.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{
    sessions::{
        store::{SessionRecord, SessionStore},
        token::SessionToken,
    },
    shoppers::ShopperId,
};

/// Session state of a shopper
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    NoSession,
    Active(SessionRecord),
}

#[derive(Clone)]
pub struct SessionTracker {
    store: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for SessionTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTracker").finish_non_exhaustive()
    }
}

impl SessionTracker {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Current session state of a shopper.
    pub async fn current(&self, shopper: &ShopperId) -> SessionState {
        match self.store.get(shopper).await {
            Some(record) => SessionState::Active(record),
            None => SessionState::NoSession,
        }
    }

    /// Token of the active session, starting one if needed.
    pub async fn ensure(&self, shopper: &ShopperId) -> SessionToken {
        self.store.get_or_start(shopper).await.token
    }

    /// End the active session, if any.
    pub async fn invalidate(&self, shopper: &ShopperId) {
        if let Some(record) = self.store.remove(shopper).await {
            debug!(%shopper, started_at = %record.started_at, "cart session ended");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::sessions::store::{InMemorySessionStore, MockSessionStore};

    use super::*;

    fn tracker() -> SessionTracker {
        SessionTracker::new(Arc::new(InMemorySessionStore::new()))
    }

    #[tokio::test]
    async fn ensure_reuses_token_until_invalidated() {
        let tracker = tracker();
        let shopper = ShopperId::new("s1");

        assert_eq!(tracker.current(&shopper).await, SessionState::NoSession);

        let first = tracker.ensure(&shopper).await;
        let second = tracker.ensure(&shopper).await;

        assert_eq!(first, second);
        assert!(
            matches!(tracker.current(&shopper).await, SessionState::Active(ref r) if r.token == first),
            "session should be active with the first token"
        );

        tracker.invalidate(&shopper).await;

        assert_eq!(tracker.current(&shopper).await, SessionState::NoSession);
        assert_ne!(tracker.ensure(&shopper).await, first);
    }

    #[tokio::test]
    async fn invalidate_without_session_is_a_no_op() {
        let mut store = MockSessionStore::new();

        store.expect_remove().once().returning(|_| None);
        store.expect_get_or_start().never();

        SessionTracker::new(Arc::new(store))
            .invalidate(&ShopperId::new("s1"))
            .await;
    }
}
