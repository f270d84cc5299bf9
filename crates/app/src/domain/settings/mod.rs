//! Drip Settings

pub mod errors;
pub mod fields;
pub mod options;
pub mod service;

pub use errors::SettingsError;
pub use fields::SettingsRegistrar;
pub use options::{InMemoryOptionsStore, OptionsStore};
pub use service::*;
