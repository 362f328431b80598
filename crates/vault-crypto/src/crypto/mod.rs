//! AES-256-GCM password encryption primitives.
//!
//! # Envelope format
//!
//! ```text
//! <hex(nonce)>:<hex(tag)>:<hex(ciphertext)>
//! ```
//!
//! The nonce is always 24 hex characters (12 bytes) and the tag always 32
//! (16 bytes). GCM does not pad, so the ciphertext field is exactly twice the
//! UTF-8 length of the plaintext.

pub mod cipher;
pub mod envelope;
pub mod key;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of an AES-GCM nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of an AES-GCM authentication tag.
pub const TAG_LEN: usize = 16;
