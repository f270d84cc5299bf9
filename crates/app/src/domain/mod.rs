//! Dripcart Domain Concerns

pub mod carts;
pub mod products;
pub mod sessions;
pub mod settings;
pub mod shoppers;
pub mod webhooks;
