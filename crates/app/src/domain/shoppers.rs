//! Shoppers

use std::fmt;

use serde::{Deserialize, Serialize};

/// Shopper identifier
///
/// Identifies one shopper's cart, e.g. a customer ID or a guest cookie value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShopperId(String);

impl ShopperId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ShopperId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for ShopperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shopper Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shopper {
    pub id: ShopperId,

    /// Email of the logged in customer, empty for guests.
    pub email: String,
}

impl Shopper {
    pub fn new(id: impl Into<ShopperId>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
        }
    }

    /// A shopper that is not logged in.
    pub fn guest(id: impl Into<ShopperId>) -> Self {
        Self::new(id, String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guest_has_empty_email() {
        let shopper = Shopper::guest("abc");

        assert_eq!(shopper.id.as_str(), "abc");
        assert!(shopper.email.is_empty(), "guest email should be empty");
    }
}
