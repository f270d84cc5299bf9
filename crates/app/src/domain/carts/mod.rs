//! Carts

pub mod errors;
pub mod hooks;
pub mod models;
pub mod observer;
pub mod service;

pub use errors::CartsServiceError;
pub use hooks::{CartHook, CartHooks, CartSubscriber, HookError};
pub use observer::CartEventObserver;
pub use service::*;
