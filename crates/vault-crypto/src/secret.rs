//! [`SecretKey`]: the process-wide secret from which the envelope key is derived.
//!
//! # Security invariants
//!
//! - The secret is **never** written to disk, logged, or included in traces.
//! - It is loaded once at startup and treated as immutable for the process lifetime.

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use serde::Deserialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::cipher::EnvelopeCipher;

/// Number of random bytes in a freshly generated secret.
pub const GENERATED_SECRET_LEN: usize = 32;

/// Opaque secret string.
///
/// Deserialises transparently from a plain string so it can be read straight
/// out of configuration. The buffer is zeroized when the value is dropped.
#[derive(Clone, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct SecretKey(String);

impl SecretKey {
    /// Wrap an existing secret string.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Generate a new secret: [`GENERATED_SECRET_LEN`] bytes from the OS CSPRNG,
    /// hex-encoded.
    pub fn generate() -> Self {
        let mut bytes = [0u8; GENERATED_SECRET_LEN];
        OsRng.fill_bytes(&mut bytes);
        let secret = hex::encode(bytes);
        bytes.zeroize();
        Self(secret)
    }

    /// Borrow the secret string.
    ///
    /// Callers must not log or persist the returned value.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the secret is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Build an [`EnvelopeCipher`] keyed by this secret.
    pub fn cipher(&self) -> EnvelopeCipher {
        EnvelopeCipher::new(&self.0)
    }
}

impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}
