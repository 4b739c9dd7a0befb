//! Per-invocation secret cache.
//!
//! Maps a secret path to the record read for it, so a path referenced many
//! times in one buffer costs one remote read. The owner creates it empty and
//! drops it when the buffer is done.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::trace;

use crate::core::store::{SecretRecord, SecretStore};
use crate::error::Result;

/// Secret records keyed by path.
#[derive(Debug, Default)]
pub struct SecretCache {
    records: HashMap<String, SecretRecord>,
}

impl SecretCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the record for `path`, reading it from `store` on a miss.
    ///
    /// The store is authenticated first if it has not been yet.
    ///
    /// # Errors
    ///
    /// Propagates authentication and read errors; nothing is cached then.
    pub fn get_or_fetch<S>(&mut self, path: &str, store: &mut S) -> Result<&SecretRecord>
    where
        S: SecretStore + ?Sized,
    {
        match self.records.entry(path.to_string()) {
            Entry::Occupied(entry) => {
                trace!(path, "secret cache hit");
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                if !store.is_authenticated() {
                    store.authenticate()?;
                }
                let record = store.read_secret(path)?;
                Ok(entry.insert(record))
            }
        }
    }

    /// Cached record for `path`, if any.
    pub fn get(&self, path: &str) -> Option<&SecretRecord> {
        self.records.get(path)
    }

    /// Number of cached paths.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been cached.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
