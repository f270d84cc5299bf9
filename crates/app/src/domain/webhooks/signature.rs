//! Webhook payload signatures.
//!
//! `X-WC-Webhook-Signature` carries the base64 encoded HMAC-SHA256 of the raw
//! request body, keyed with the webhook secret.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Sign a request body.
#[must_use]
pub fn sign(body: &[u8], secret: &str) -> String {
    // HMAC accepts keys of any length, including empty ones.
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return String::new();
    };

    mac.update(body);

    BASE64.encode(mac.finalize().into_bytes())
}

/// Check a signature against a request body in constant time.
#[must_use]
pub fn verify(body: &[u8], secret: &str, signature: &str) -> bool {
    let Ok(expected) = BASE64.decode(signature) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };

    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}
