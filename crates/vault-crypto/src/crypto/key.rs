//! Secret → AES-256 key derivation.

use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::KEY_LEN;

/// Fixed-size key buffer holding exactly [`KEY_LEN`] bytes.
///
/// The memory is overwritten with zeroes when the value is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_LEN]);

impl DerivedKey {
    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material — not even in debug builds.
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Derive the AES-256 key for `secret` as SHA-256 over its UTF-8 bytes.
///
/// Pure and deterministic: the same secret always yields the same key.
pub fn derive_key(secret: &str) -> DerivedKey {
    let mut digest = Sha256::digest(secret.as_bytes());
    let mut key = [0u8; KEY_LEN];
    key.copy_from_slice(&digest);
    digest.as_mut_slice().zeroize();
    DerivedKey(key)
}
