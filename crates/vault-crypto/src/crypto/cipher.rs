//! AES-256-GCM encryption and decryption of password strings.
//!
//! **Nonce handling:** a fresh 96-bit nonce is drawn from the OS CSPRNG on every
//! call. GCM nonce reuse under one key breaks both confidentiality and
//! authentication, so nonces are never derived from the plaintext or the key.

use aes_gcm::{
    aead::{rand_core::RngCore, AeadInPlace, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce, Tag,
};
use thiserror::Error;
use tracing::debug;
use zeroize::Zeroize;

use super::envelope::Envelope;
use super::key::{derive_key, DerivedKey};
use super::{NONCE_LEN, TAG_LEN};

/// Errors produced by the cipher layer.
///
/// The two decryption variants exist for internal diagnostics only. Anything
/// user-facing must treat them identically (see `common::ServiceError::Unreadable`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CipherError {
    /// The envelope string is malformed: wrong field count, an empty field,
    /// wrong field length, non-hex characters, or non-UTF-8 plaintext.
    #[error("invalid envelope format")]
    InvalidEnvelopeFormat,

    /// The envelope is well-formed but its tag did not verify (wrong secret or
    /// tampered data).
    #[error("authentication failure")]
    AuthenticationFailure,

    /// AES-GCM refused to encrypt (plaintext beyond the GCM length limit).
    #[error("encryption failure")]
    EncryptionFailure,
}

/// Envelope encryption bound to one secret.
///
/// The secret is injected once at construction and its derived key cached for
/// the lifetime of the value. Instances are immutable, `Send` and `Sync`, so a
/// single cipher can be shared across threads.
#[derive(Clone, Debug)]
pub struct EnvelopeCipher {
    key: DerivedKey,
}

impl EnvelopeCipher {
    /// Build a cipher for `secret`.
    pub fn new(secret: &str) -> Self {
        Self {
            key: derive_key(secret),
        }
    }

    /// Encrypt `plaintext` into its serialised envelope string.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::EncryptionFailure`] only if the plaintext exceeds
    /// the AES-GCM length limit.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CipherError> {
        self.seal(plaintext.as_bytes()).map(|env| env.to_string())
    }

    /// Verify and decrypt a serialised envelope back to the plaintext string.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidEnvelopeFormat`] if the envelope cannot be
    /// parsed and [`CipherError::AuthenticationFailure`] if the tag does not
    /// verify under this cipher's key.
    pub fn decrypt(&self, envelope: &str) -> Result<String, CipherError> {
        let result = envelope
            .parse::<Envelope>()
            .and_then(|env| self.open(&env))
            .and_then(|bytes| {
                String::from_utf8(bytes).map_err(|e| {
                    e.into_bytes().zeroize();
                    CipherError::InvalidEnvelopeFormat
                })
            });
        if let Err(e) = &result {
            debug!(error = %e, "envelope rejected");
        }
        result
    }

    /// Encrypt raw bytes into an [`Envelope`].
    ///
    /// # Errors
    ///
    /// See [`EnvelopeCipher::encrypt`].
    pub fn seal(&self, plaintext: &[u8]) -> Result<Envelope, CipherError> {
        let cipher = self.build_cipher();

        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce);

        let mut ciphertext = plaintext.to_vec();
        let tag = cipher
            .encrypt_in_place_detached(Nonce::from_slice(&nonce), b"", &mut ciphertext)
            .map_err(|_| CipherError::EncryptionFailure)?;

        let mut tag_bytes = [0u8; TAG_LEN];
        tag_bytes.copy_from_slice(&tag);

        Ok(Envelope {
            nonce,
            tag: tag_bytes,
            ciphertext,
        })
    }

    /// Verify the tag of `envelope` and, only if it matches, return the
    /// decrypted bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::AuthenticationFailure`] if the tag does not verify.
    /// No plaintext bytes are released on that path.
    pub fn open(&self, envelope: &Envelope) -> Result<Vec<u8>, CipherError> {
        let cipher = self.build_cipher();
        let mut buffer = envelope.ciphertext.clone();
        cipher
            .decrypt_in_place_detached(
                Nonce::from_slice(&envelope.nonce),
                b"",
                &mut buffer,
                Tag::from_slice(&envelope.tag),
            )
            .map_err(|_| CipherError::AuthenticationFailure)?;
        Ok(buffer)
    }

    /// Decrypt `envelope` with this cipher and re-encrypt the plaintext under
    /// `to` with a fresh nonce.
    ///
    /// # Errors
    ///
    /// Propagates decryption errors from this cipher unchanged.
    pub fn reseal(&self, envelope: &str, to: &EnvelopeCipher) -> Result<String, CipherError> {
        let mut plaintext = self.decrypt(envelope)?;
        let resealed = to.encrypt(&plaintext);
        plaintext.zeroize();
        resealed
    }

    fn build_cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(self.key.as_bytes()))
    }
}

/// Encrypt `plaintext` under the key derived from `secret`.
///
/// # Errors
///
/// See [`EnvelopeCipher::encrypt`].
pub fn encrypt(plaintext: &str, secret: &str) -> Result<String, CipherError> {
    EnvelopeCipher::new(secret).encrypt(plaintext)
}

/// Verify and decrypt `envelope` under the key derived from `secret`.
///
/// # Errors
///
/// See [`EnvelopeCipher::decrypt`].
pub fn decrypt(envelope: &str, secret: &str) -> Result<String, CipherError> {
    EnvelopeCipher::new(secret).decrypt(envelope)
}
