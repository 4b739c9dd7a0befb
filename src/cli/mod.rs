//! Command-line shim.
//!
//! The shim takes exactly the argument vector of the wrapped CLI, so its own
//! settings come from the environment only.

pub mod args;
pub mod output;
pub mod run;

use std::ffi::OsString;
use std::io::Write;

use clap::{ArgAction, Parser};
use tracing::debug;

use crate::core::cache::SecretCache;
use crate::core::constants;
use crate::core::store::{VaultClient, VaultSettings};
use crate::core::{substitute, values};
use crate::error::{ConfigError, Result};

/// helm-vault - resolve Vault references in Helm values, then run Helm.
///
/// Every field is read from its environment variable; the long flags only
/// exist so tests can build settings without touching the environment.
#[derive(Parser)]
#[command(
    name = "helm-vault",
    about = "Resolve Vault secret references in Helm values files, then run Helm",
    version
)]
pub struct Settings {
    /// Wrapped command
    #[arg(long, env = constants::CMD_ENV, default_value = constants::DEFAULT_CMD)]
    pub command: String,

    /// Substitute anything at all
    #[arg(long, env = constants::ENABLED_ENV, default_value = "true", value_parser = parse_switch, action = ArgAction::Set)]
    pub enabled: bool,

    /// Substitute references in values files
    #[arg(long, env = constants::VALUES_ENV, default_value = "true", value_parser = parse_switch, action = ArgAction::Set)]
    pub replace_values: bool,

    /// Substitute references in the wrapped command's stdout
    #[arg(long, env = constants::OUTPUT_ENV, default_value = "false", value_parser = parse_switch, action = ArgAction::Set)]
    pub replace_output: bool,

    /// AppRole role id
    #[arg(long, env = constants::ROLE_ID_ENV, default_value = "")]
    pub role_id: String,

    /// AppRole secret id
    #[arg(long, env = constants::SECRET_ID_ENV, default_value = "", hide_env_values = true)]
    pub secret_id: String,

    /// AppRole auth mount
    #[arg(long, env = constants::APPROLE_MOUNT_ENV, default_value = constants::DEFAULT_APPROLE_MOUNT)]
    pub approle_mount: String,

    /// Vault address
    #[arg(long, env = constants::VAULT_ADDR_ENV, default_value = constants::DEFAULT_VAULT_ADDR)]
    pub vault_addr: String,

    /// Pre-issued Vault token, used when no role id is set
    #[arg(long, env = constants::VAULT_TOKEN_ENV, hide_env_values = true)]
    pub vault_token: Option<String>,

    /// Vault Enterprise namespace
    #[arg(long, env = constants::VAULT_NAMESPACE_ENV)]
    pub vault_namespace: Option<String>,
}

/// Switches are on only for the literal `true`.
fn parse_switch(value: &str) -> std::result::Result<bool, String> {
    Ok(value.trim() == "true")
}

impl Settings {
    /// Read settings from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a value cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Ok(Self::try_parse_from([constants::BIN_NAME]).map_err(ConfigError::Invalid)?)
    }

    /// Connection settings for the Vault client.
    pub fn vault(&self) -> VaultSettings {
        VaultSettings {
            addr: self.vault_addr.clone(),
            role_id: self.role_id.clone(),
            secret_id: self.secret_id.clone(),
            approle_mount: self.approle_mount.clone(),
            token: self.vault_token.clone(),
            namespace: self.vault_namespace.clone(),
        }
    }
}

/// Substitute values files, run the wrapped command, return its exit code.
///
/// # Errors
///
/// Returns the first configuration, Vault, substitution or I/O error. Values
/// files are processed before the wrapped command runs, so on error it does
/// not run at all.
pub fn execute(settings: &Settings, args: &[OsString]) -> Result<i32> {
    let command = run::resolve(&settings.command)?;

    if !settings.enabled {
        debug!("substitution disabled");
        return run::passthrough(&command, args);
    }

    let mut client = VaultClient::new(settings.vault())?;

    if settings.replace_values {
        for file in args::values_files(args) {
            values::substitute_file(&file, &mut client)?;
        }
    }

    if !settings.replace_output {
        return run::passthrough(&command, args);
    }

    let captured = run::capture(&command, args)?;
    let mut stdout = std::io::stdout().lock();

    if captured.code != 0 {
        stdout.write_all(&captured.stdout)?;
        stdout.flush()?;
        return Ok(captured.code);
    }

    let result =
        substitute::resolve_and_replace(&captured.stdout, &mut client, &mut SecretCache::new())?;
    stdout.write_all(&result.output)?;
    if result.changed {
        stdout.write_all(constants::DOCUMENT_SEPARATOR.as_bytes())?;
    }
    stdout.flush()?;

    Ok(captured.code)
}
