//! Sealing and revealing whole credential records.
//!
//! Only the `password` field is encrypted; every other field passes through
//! untouched.

use common::protocol::{Credential, StoredCredential, DECRYPTION_ERROR_PLACEHOLDER};
use tracing::warn;

use crate::crypto::cipher::{CipherError, EnvelopeCipher};

/// Encrypt the password of `credential` for storage.
///
/// # Errors
///
/// Returns [`CipherError::EncryptionFailure`] if the password cannot be encrypted.
pub fn seal_credential(
    cipher: &EnvelopeCipher,
    credential: Credential,
) -> Result<StoredCredential, CipherError> {
    let password = cipher.encrypt(&credential.password)?;
    Ok(StoredCredential {
        service: credential.service,
        url: credential.url,
        username: credential.username,
        password,
        category: credential.category,
        icon: credential.icon,
    })
}

/// Decrypt the password of a stored record.
///
/// # Errors
///
/// Returns the underlying [`CipherError`] if the envelope is malformed or does
/// not authenticate.
pub fn reveal_credential(
    cipher: &EnvelopeCipher,
    stored: StoredCredential,
) -> Result<Credential, CipherError> {
    let password = cipher.decrypt(&stored.password)?;
    Ok(into_credential(stored, password))
}

/// Decrypt every record of a listing.
///
/// A record that cannot be decrypted keeps its other fields and gets
/// [`DECRYPTION_ERROR_PLACEHOLDER`] as its password; the listing itself never fails.
pub fn reveal_all(cipher: &EnvelopeCipher, stored: Vec<StoredCredential>) -> Vec<Credential> {
    stored
        .into_iter()
        .enumerate()
        .map(|(index, record)| match cipher.decrypt(&record.password) {
            Ok(password) => into_credential(record, password),
            Err(_) => {
                warn!(index, "credential password could not be decrypted");
                into_credential(record, DECRYPTION_ERROR_PLACEHOLDER.to_owned())
            }
        })
        .collect()
}

fn into_credential(stored: StoredCredential, password: String) -> Credential {
    Credential {
        service: stored.service,
        url: stored.url,
        username: stored.username,
        password,
        category: stored.category,
        icon: stored.icon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential(service: &str, password: &str) -> Credential {
        Credential {
            service: service.into(),
            url: format!("https://{service}.example"),
            username: "alice".into(),
            password: password.into(),
            category: "personal".into(),
            icon: "key".into(),
        }
    }

    #[test]
    fn seal_encrypts_only_the_password() {
        let cipher = EnvelopeCipher::new("vault-secret");
        let stored = seal_credential(&cipher, credential("github", "hunter2")).unwrap();
        assert_ne!(stored.password, "hunter2");
        assert_eq!(stored.password.split(':').count(), 3);
        assert_eq!(stored.username, "alice");
        assert_eq!(stored.url, "https://github.example");
    }

    #[test]
    fn seal_then_reveal_restores_record() {
        let cipher = EnvelopeCipher::new("vault-secret");
        let original = credential("mail", "correct horse battery staple");
        let stored = seal_credential(&cipher, original.clone()).unwrap();
        assert_eq!(reveal_credential(&cipher, stored).unwrap(), original);
    }

    #[test]
    fn reveal_with_wrong_secret_fails() {
        let stored =
            seal_credential(&EnvelopeCipher::new("a"), credential("bank", "1234")).unwrap();
        assert_eq!(
            reveal_credential(&EnvelopeCipher::new("b"), stored),
            Err(CipherError::AuthenticationFailure)
        );
    }

    #[test]
    fn reveal_all_substitutes_placeholder_for_bad_records() {
        let cipher = EnvelopeCipher::new("vault-secret");
        let good = seal_credential(&cipher, credential("github", "hunter2")).unwrap();
        let mut corrupt = seal_credential(&cipher, credential("bank", "1234")).unwrap();
        corrupt.password = "not-an-envelope".into();

        let revealed = reveal_all(&cipher, vec![good, corrupt]);
        assert_eq!(revealed.len(), 2);
        assert_eq!(revealed[0].password, "hunter2");
        assert_eq!(revealed[1].password, DECRYPTION_ERROR_PLACEHOLDER);
        assert_eq!(revealed[1].service, "bank");
    }

    #[test]
    fn reveal_all_of_empty_listing_is_empty() {
        assert!(reveal_all(&EnvelopeCipher::new("s"), Vec::new()).is_empty());
    }
}
