//! Settings errors.

use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{option} must be a whole number, got {value:?}")]
    InvalidNumber {
        option: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("unknown option {0}")]
    UnknownOption(String),
}
