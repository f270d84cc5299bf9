//! Cart session tokens.

use std::{fmt, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of random bytes in a session token.
pub const SESSION_TOKEN_BYTES: usize = 32;

/// Number of hex characters in a rendered session token.
pub const SESSION_TOKEN_LEN: usize = SESSION_TOKEN_BYTES * 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionTokenError {
    #[error("session token must be {SESSION_TOKEN_LEN} characters, got {0}")]
    InvalidLength(usize),

    #[error("session token must be lowercase hex")]
    InvalidEncoding,
}

/// Session token
///
/// Correlates the cart events of one continuous shopping session.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a fresh token from the OS random number generator.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; SESSION_TOKEN_BYTES];

        OsRng.fill_bytes(&mut bytes);

        Self(encode_hex(&bytes))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&self.0).finish()
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SessionToken {
    type Err = SessionTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.len() != SESSION_TOKEN_LEN {
            return Err(SessionTokenError::InvalidLength(value.len()));
        }

        if !value.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(SessionTokenError::InvalidEncoding);
        }

        Ok(Self(value.to_string()))
    }
}

impl TryFrom<String> for SessionToken {
    type Error = SessionTokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SessionToken> for String {
    fn from(token: SessionToken) -> Self {
        token.0
    }
}

fn encode_hex(bytes: &[u8; SESSION_TOKEN_BYTES]) -> String {
    let mut encoded = String::with_capacity(SESSION_TOKEN_LEN);

    for byte in bytes {
        for nibble in [byte >> 4, byte & 0x0f] {
            encoded.push(char::from_digit(u32::from(nibble), 16).unwrap_or('0'));
        }
    }

    encoded
}
