//! Settings Handlers

pub(crate) mod fields;
pub(crate) mod get;
pub(crate) mod update;
