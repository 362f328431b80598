//! Subcommand implementations.
//!
//! Every command reads from a generic [`BufRead`] and writes to a generic
//! [`Write`] so that tests can drive them with in-memory buffers.

use std::io::{BufRead, Write};

use common::protocol::{Credential, StoredCredential};
use common::ServiceError;
use tracing::{info, warn};
use vault_crypto::{vault, EnvelopeCipher, SecretKey};

use crate::config::Config;

/// Commands that need a configured secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Encrypt one plaintext password.
    Encrypt(String),
    /// Decrypt one envelope.
    Decrypt(String),
    /// Seal a JSON array of credentials read from input.
    Seal,
    /// Reveal a JSON array of stored credentials read from input.
    Reveal,
    /// Re-encrypt envelopes (one per line) from the previous secret to the current one.
    Rotate,
}

/// Run `action` against the configured secret.
///
/// # Errors
///
/// Returns a [`ServiceError`] whose [`ServiceError::exit_code`] becomes the
/// process exit status.
pub fn run<R: BufRead, W: Write>(
    action: Action,
    cfg: &Config,
    input: R,
    mut out: W,
) -> Result<(), ServiceError> {
    let cipher = cfg.secret_key.cipher();
    match action {
        Action::Encrypt(plaintext) => {
            let envelope = cipher.encrypt(&plaintext)?;
            write_line(&mut out, &envelope)
        }
        Action::Decrypt(envelope) => {
            let plaintext = cipher.decrypt(&envelope)?;
            write_line(&mut out, &plaintext)
        }
        Action::Seal => seal(&cipher, input, out),
        Action::Reveal => reveal(&cipher, input, out),
        Action::Rotate => {
            let previous = cfg
                .previous_secret_key
                .as_ref()
                .ok_or_else(|| {
                    ServiceError::Unavailable("PREVIOUS_SECRET_KEY is not set".into())
                })?;
            rotate(&previous.cipher(), &cipher, input, out)
        }
    }
}

/// Print a freshly generated secret.
///
/// # Errors
///
/// Returns [`ServiceError::Internal`] if the output cannot be written.
pub fn generate_secret<W: Write>(mut out: W) -> Result<(), ServiceError> {
    let secret = SecretKey::generate();
    write_line(&mut out, secret.expose())
}

fn seal<R: BufRead, W: Write>(
    cipher: &EnvelopeCipher,
    input: R,
    out: W,
) -> Result<(), ServiceError> {
    let credentials: Vec<Credential> = serde_json::from_reader(input)
        .map_err(|e| {
            ServiceError::BadRequest(format!("expected a JSON array of credentials: {e}"))
        })?;
    let count = credentials.len();

    let stored = credentials
        .into_iter()
        .map(|c| vault::seal_credential(cipher, c))
        .collect::<Result<Vec<_>, _>>()?;

    write_json(out, &stored)?;
    info!(count, "credentials sealed");
    Ok(())
}

fn reveal<R: BufRead, W: Write>(
    cipher: &EnvelopeCipher,
    input: R,
    out: W,
) -> Result<(), ServiceError> {
    let stored: Vec<StoredCredential> = serde_json::from_reader(input).map_err(|e| {
        ServiceError::BadRequest(format!("expected a JSON array of stored credentials: {e}"))
    })?;
    let count = stored.len();

    let revealed = vault::reveal_all(cipher, stored);
    write_json(out, &revealed)?;
    info!(count, "credentials revealed");
    Ok(())
}

fn rotate<R: BufRead, W: Write>(
    from: &EnvelopeCipher,
    to: &EnvelopeCipher,
    input: R,
    mut out: W,
) -> Result<(), ServiceError> {
    // Reseal everything before writing anything, so a bad line yields no partial output.
    let mut resealed = Vec::new();
    for (index, line) in input.lines().enumerate() {
        let line =
            line.map_err(|e| ServiceError::BadRequest(format!("failed to read input: {e}")))?;
        let envelope = line.trim();
        if envelope.is_empty() {
            continue;
        }
        let next = from.reseal(envelope, to).map_err(|e| {
            warn!(line = index + 1, "envelope could not be rotated");
            ServiceError::from(e)
        })?;
        resealed.push(next);
    }

    for envelope in &resealed {
        write_line(&mut out, envelope)?;
    }
    info!(count = resealed.len(), "envelopes rotated");
    Ok(())
}

fn write_line<W: Write>(out: &mut W, value: &str) -> Result<(), ServiceError> {
    writeln!(out, "{value}")
        .map_err(|e| ServiceError::Internal(format!("failed to write output: {e}")))
}

fn write_json<W: Write, T: serde::Serialize>(mut out: W, value: &T) -> Result<(), ServiceError> {
    serde_json::to_writer_pretty(&mut out, value)
        .map_err(|e| ServiceError::Internal(format!("failed to write output: {e}")))?;
    write_line(&mut out, "")
}
