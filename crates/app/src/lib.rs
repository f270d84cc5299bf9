//! Shared application services: carts, sessions, webhooks and settings.

pub mod context;
pub mod domain;
