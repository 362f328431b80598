//! Configuration loading and validation for the vault CLI.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any required variable is missing or invalid.

use anyhow::{Context, Result};
use serde::Deserialize;
use vault_crypto::SecretKey;

/// Validated vault configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Process-wide secret the envelope key is derived from. **Required.**
    pub secret_key: SecretKey,

    /// Secret that existing envelopes were sealed under, read by `rotate`.
    #[serde(default)]
    pub previous_secret_key: Option<SecretKey>,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.secret_key.is_blank() {
            anyhow::bail!("SECRET_KEY is required and must not be empty");
        }
        if let Some(previous) = &self.previous_secret_key {
            if previous.is_blank() {
                anyhow::bail!("PREVIOUS_SECRET_KEY must not be empty when set");
            }
            if previous == &self.secret_key {
                anyhow::bail!("PREVIOUS_SECRET_KEY must differ from SECRET_KEY");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(secret: &str, previous: Option<&str>) -> Config {
        Config {
            secret_key: SecretKey::new(secret),
            previous_secret_key: previous.map(SecretKey::new),
            log_level: default_log_level(),
        }
    }

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn validate_rejects_blank_secret() {
        assert!(cfg("   ", None).validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_previous_secret() {
        assert!(cfg("current", Some("")).validate().is_err());
    }

    #[test]
    fn validate_rejects_identical_secrets() {
        assert!(cfg("same", Some("same")).validate().is_err());
    }

    #[test]
    fn validate_accepts_valid_config() {
        assert!(cfg("current", None).validate().is_ok());
        assert!(cfg("current", Some("previous")).validate().is_ok());
    }

    #[test]
    fn debug_output_hides_secrets() {
        let rendered = format!("{:?}", cfg("top-secret", Some("old-secret")));
        assert!(!rendered.contains("top-secret"));
        assert!(!rendered.contains("old-secret"));
    }
}
