//! Error types.
//!
//! Everything below `main` returns these; only `main` turns them into an
//! exit code.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Vault(#[from] VaultError),

    #[error(transparent)]
    Substitute(#[from] SubstituteError),

    #[error("file {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(#[from] clap::Error),

    #[error("invalid Vault address '{addr}': {reason}")]
    InvalidAddress { addr: String, reason: String },

    #[error("wrapped command not found: {0}")]
    CommandNotFound(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Secret store errors.
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("network error communicating with Vault: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Vault login failed (status {status}): {message}")]
    Login { status: u16, message: String },

    #[error("Vault login response carried no client token")]
    MissingToken,

    #[error("Vault read of '{path}' failed (status {status}): {message}")]
    Read {
        path: String,
        status: u16,
        message: String,
    },

    #[error("Vault path '{path}' not found: {message}")]
    NotFound { path: String, message: String },

    #[error("Vault path '{0}' is empty - did you forget to include <engine>/data/<path> in the path for kv-v2?")]
    EmptyPath(String),

    #[error("unexpected Vault response for '{path}': {reason}")]
    Malformed { path: String, reason: String },
}

/// Substitution errors.
#[derive(Error, Debug)]
pub enum SubstituteError {
    #[error("unsupported transform: {0}")]
    UnsupportedTransform(String),
}

pub type Result<T> = std::result::Result<T, Error>;
