//! Cart Handlers

pub(crate) mod empty;
pub(crate) mod get;
