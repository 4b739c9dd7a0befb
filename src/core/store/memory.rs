//! In-memory secret store.
//!
//! Serves fixed records and counts logins and reads. Used by tests and
//! benchmarks in place of a live Vault.

use std::collections::HashMap;

use serde_json::Value;

use super::{SecretRecord, SecretStore};
use crate::error::{Result, VaultError};

/// Secret store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    secrets: HashMap<String, SecretRecord>,
    authenticated: bool,
    fail_login: bool,
    logins: usize,
    reads: HashMap<String, usize>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a secret. Non-object values are stored as an empty record.
    pub fn with_secret(mut self, path: &str, fields: Value) -> Self {
        let record = match fields {
            Value::Object(map) => map,
            _ => SecretRecord::new(),
        };
        self.secrets.insert(path.to_string(), record);
        self
    }

    /// Make every login attempt fail.
    pub fn failing_login(mut self) -> Self {
        self.fail_login = true;
        self
    }

    /// Number of login attempts.
    pub fn logins(&self) -> usize {
        self.logins
    }

    /// Number of reads of `path`.
    pub fn reads(&self, path: &str) -> usize {
        self.reads.get(path).copied().unwrap_or(0)
    }

    /// Number of reads across all paths.
    pub fn total_reads(&self) -> usize {
        self.reads.values().sum()
    }
}

impl SecretStore for MemoryStore {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    fn authenticate(&mut self) -> Result<()> {
        self.logins += 1;
        if self.fail_login {
            return Err(VaultError::Login {
                status: 400,
                message: "invalid role or secret ID".to_string(),
            }
            .into());
        }
        self.authenticated = true;
        Ok(())
    }

    fn read_secret(&mut self, path: &str) -> Result<SecretRecord> {
        if !self.authenticated {
            return Err(VaultError::MissingToken.into());
        }
        *self.reads.entry(path.to_string()).or_default() += 1;

        match self.secrets.get(path) {
            Some(record) if !record.is_empty() => Ok(record.clone()),
            Some(_) => Err(VaultError::EmptyPath(path.to_string()).into()),
            None => Err(VaultError::NotFound {
                path: path.to_string(),
                message: "no secret at this path".to_string(),
            }
            .into()),
        }
    }
}
