//! seekdream login secret derivation.
//!
//! The backend does not take the account password directly. The client
//! hex-encodes an MD5 of the password, strips seven characters from each
//! end of that hex string, and sends the MD5 hex of the remainder.

use md5::{Digest, Md5};

/// Lowercase MD5 hex of `input`.
pub fn md5_hex(input: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Derives the wire login secret from the configured password.
pub fn derive_login_secret(password: &str) -> String {
    let outer = md5_hex(password);
    let inner = &outer[7..outer.len() - 7];
    md5_hex(inner)
}

// ============================================================================
// Tests
// ============================================================================
