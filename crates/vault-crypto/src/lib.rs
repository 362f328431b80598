//! At-rest encryption for credential passwords.
//!
//! # Responsibilities
//!
//! - Derive a 256-bit key from the process-wide secret ([`derive_key`]).
//! - Encrypt a password into a self-contained `<nonce>:<tag>:<ciphertext>`
//!   envelope and verify + decrypt it again ([`EnvelopeCipher`]).
//! - Seal and reveal whole credential records ([`vault`]).
//!
//! # Module invariants
//!
//! - **No I/O.** Every operation is synchronous and stateless apart from the OS
//!   random source drawn on for nonces.
//! - **No secret material in logs.** Neither the secret, the derived key, nor
//!   any plaintext may appear in a tracing field.

pub mod crypto;
pub mod secret;
pub mod vault;

pub use crypto::cipher::{decrypt, encrypt, CipherError, EnvelopeCipher};
pub use crypto::envelope::Envelope;
pub use crypto::key::{derive_key, DerivedKey};
pub use secret::SecretKey;

use common::ServiceError;

impl From<CipherError> for ServiceError {
    fn from(err: CipherError) -> Self {
        match err {
            CipherError::InvalidEnvelopeFormat | CipherError::AuthenticationFailure => {
                ServiceError::Unreadable
            }
            CipherError::EncryptionFailure => ServiceError::Internal("encryption failed".into()),
        }
    }
}
