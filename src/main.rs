//! helm-vault - resolve Vault references in Helm values files, then run Helm.

use std::ffi::OsString;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use helm_vault::cli::{self, output, Settings};
use helm_vault::core::constants;
use helm_vault::core::transform::Transform;
use helm_vault::error::{ConfigError, Error, SubstituteError, VaultError};

fn main() {
    // stdout carries the wrapped command's output, so logs go to stderr
    let filter = EnvFilter::try_from_env(constants::LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(constants::DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    let args: Vec<OsString> = std::env::args_os().skip(1).collect();

    match Settings::from_env().and_then(|settings| cli::execute(&settings, &args)) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            output::error(&e.to_string());
            if let Some(hint) = suggestion(&e) {
                output::hint(&hint);
            }
            std::process::exit(1);
        }
    }
}

fn suggestion(e: &Error) -> Option<String> {
    match e {
        Error::Vault(VaultError::Login { .. }) | Error::Vault(VaultError::MissingToken) => Some(
            format!(
                "check {} and {}",
                constants::ROLE_ID_ENV,
                constants::SECRET_ID_ENV
            ),
        ),
        Error::Vault(VaultError::Network(_)) => {
            Some(format!("check {} points at a reachable Vault", constants::VAULT_ADDR_ENV))
        }
        Error::Substitute(SubstituteError::UnsupportedTransform(_)) => {
            let names: Vec<&str> = Transform::ALL.iter().map(Transform::name).collect();
            Some(format!("supported transforms: {}", names.join(", ")))
        }
        Error::Config(ConfigError::CommandNotFound(_)) => Some(format!(
            "set {} to the helm binary",
            constants::CMD_ENV
        )),
        _ => None,
    }
}
