//! Credential record types exchanged with the surrounding system.
//!
//! These types are serialised as JSON. A [`Credential`] carries the password in
//! plaintext and only ever lives in memory; a [`StoredCredential`] carries the
//! password as an encrypted envelope and is what gets persisted.

use serde::{Deserialize, Serialize};

/// Password value substituted into a listing when a record cannot be decrypted.
pub const DECRYPTION_ERROR_PLACEHOLDER: &str = "[DECRYPTION_ERROR]";

// ---------------------------------------------------------------------------
// Plaintext record
// ---------------------------------------------------------------------------

/// A credential record with its password in plaintext.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Service name (e.g. `"GitHub"`).
    pub service: String,
    /// Login URL for the service.
    #[serde(default)]
    pub url: String,
    /// Account name on the service.
    #[serde(default)]
    pub username: String,
    /// Plaintext password.
    pub password: String,
    /// Free-form grouping label.
    #[serde(default)]
    pub category: String,
    /// Icon identifier used by the UI.
    #[serde(default)]
    pub icon: String,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("service", &self.service)
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("category", &self.category)
            .field("icon", &self.icon)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Stored record
// ---------------------------------------------------------------------------

/// A credential record as persisted: `password` holds a
/// `<nonce>:<tag>:<ciphertext>` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredential {
    /// Service name.
    pub service: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub username: String,
    /// Encrypted password envelope.
    pub password: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub icon: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn optional_fields_default_to_empty() {
        let c: Credential =
            serde_json::from_value(json!({"service": "GitHub", "password": "hunter2"})).unwrap();
        assert_eq!(c.service, "GitHub");
        assert!(c.url.is_empty());
        assert!(c.icon.is_empty());
    }

    #[test]
    fn credential_debug_hides_password() {
        let c: Credential =
            serde_json::from_value(json!({"service": "GitHub", "password": "hunter2"})).unwrap();
        assert!(!format!("{c:?}").contains("hunter2"));
    }

    #[test]
    fn missing_password_is_rejected() {
        let res: Result<StoredCredential, _> = serde_json::from_value(json!({"service": "GitHub"}));
        assert!(res.is_err());
    }

    #[test]
    fn stored_credential_serialises_all_fields() {
        let s = StoredCredential {
            service: "Mail".into(),
            url: "https://mail.example".into(),
            username: "alice".into(),
            password: "00:11:22".into(),
            category: "work".into(),
            icon: "envelope".into(),
        };
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["category"], "work");
        assert_eq!(v["password"], "00:11:22");
    }
}
