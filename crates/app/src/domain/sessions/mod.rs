//! Cart Sessions

pub mod store;
pub mod token;
pub mod tracker;

pub use store::{InMemorySessionStore, SessionRecord, SessionStore};
pub use token::{SessionToken, SessionTokenError};
pub use tracker::{SessionState, SessionTracker};
