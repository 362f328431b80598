//! `securepass-vault` — command-line entry point.
//!
//! Startup sequence:
//! 1. Parse the command line.
//! 2. Load and validate [`Config`](config::Config) from environment variables.
//! 3. Initialise structured JSON logging.
//! 4. Run the requested command against the configured secret.

mod commands;
mod config;
mod telemetry;

use std::io;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;

use commands::Action;

/// Encrypt and decrypt vault passwords at rest.
#[derive(Parser, Debug)]
#[command(name = "securepass-vault", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Encrypt a password and print its envelope.
    Encrypt {
        /// Plaintext password.
        plaintext: String,
    },
    /// Decrypt an envelope and print the password.
    Decrypt {
        /// `<nonce>:<tag>:<ciphertext>` envelope.
        envelope: String,
    },
    /// Seal a JSON array of credentials read from stdin.
    Seal,
    /// Reveal a JSON array of stored credentials read from stdin.
    Reveal,
    /// Re-encrypt envelopes (one per stdin line) from PREVIOUS_SECRET_KEY to SECRET_KEY.
    Rotate,
    /// Print a newly generated secret suitable for SECRET_KEY.
    GenerateSecret,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Encrypt { .. } => "encrypt",
            Command::Decrypt { .. } => "decrypt",
            Command::Seal => "seal",
            Command::Reveal => "reveal",
            Command::Rotate => "rotate",
            Command::GenerateSecret => "generate-secret",
        }
    }

    /// The configured-secret action for this command, or `None` for
    /// `generate-secret`, which runs without configuration.
    fn into_action(self) -> Option<Action> {
        match self {
            Command::Encrypt { plaintext } => Some(Action::Encrypt(plaintext)),
            Command::Decrypt { envelope } => Some(Action::Decrypt(envelope)),
            Command::Seal => Some(Action::Seal),
            Command::Reveal => Some(Action::Reveal),
            Command::Rotate => Some(Action::Rotate),
            Command::GenerateSecret => None,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let command_name = cli.command.name();

    // Provisioning a secret must not require one to be configured already.
    let Some(action) = cli.command.into_action() else {
        return finish(commands::generate_secret(io::stdout().lock()));
    };

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------
    let cfg = match config::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            // Telemetry is not yet up; write to stderr directly.
            eprintln!("ERROR: configuration invalid: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    // -----------------------------------------------------------------------
    // Telemetry
    // -----------------------------------------------------------------------
    if let Err(e) = telemetry::init(&cfg.log_level) {
        eprintln!("ERROR: {e:#}");
        return ExitCode::FAILURE;
    }
    info!(
        version = env!("CARGO_PKG_VERSION"),
        command = command_name,
        "securepass-vault starting"
    );

    // -----------------------------------------------------------------------
    // Command
    // -----------------------------------------------------------------------
    finish(commands::run(
        action,
        &cfg,
        io::stdin().lock(),
        io::stdout().lock(),
    ))
}

fn finish(result: Result<(), common::ServiceError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_encrypt_with_argument() {
        let cli = Cli::try_parse_from(["securepass-vault", "encrypt", "hunter2"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Encrypt { ref plaintext } if plaintext == "hunter2"
        ));
    }

    #[test]
    fn parses_generate_secret_in_kebab_case() {
        let cli = Cli::try_parse_from(["securepass-vault", "generate-secret"]).unwrap();
        assert_eq!(cli.command.name(), "generate-secret");
    }

    #[test]
    fn generate_secret_has_no_configured_action() {
        let cli = Cli::try_parse_from(["securepass-vault", "generate-secret"]).unwrap();
        assert!(cli.command.into_action().is_none());
        let cli = Cli::try_parse_from(["securepass-vault", "rotate"]).unwrap();
        assert_eq!(cli.command.into_action(), Some(Action::Rotate));
    }

    #[test]
    fn decrypt_requires_an_envelope() {
        assert!(Cli::try_parse_from(["securepass-vault", "decrypt"]).is_err());
    }
}
