//! Secret store access.
//!
//! The substitution engine only sees the [`SecretStore`] trait. The real
//! implementation is [`VaultClient`]; tests and benches use [`MemoryStore`].
//!
//! ## Adding a New Store
//!
//! 1. Implement the `SecretStore` trait
//! 2. Add the implementation in a new file (e.g., `consul.rs`)
//! 3. Re-export from this module

use crate::error::Result;

mod memory;
mod vault;

pub use memory::MemoryStore;
pub use vault::{VaultClient, VaultSettings};

/// Full field set of one secret path.
///
/// Values keep their JSON type; only strings are substitutable.
pub type SecretRecord = serde_json::Map<String, serde_json::Value>;

/// Authenticated, path-based secret reads.
pub trait SecretStore {
    /// Whether [`SecretStore::authenticate`] already succeeded.
    fn is_authenticated(&self) -> bool;

    /// Log in to the store.
    ///
    /// Called at most once, lazily, before the first read.
    ///
    /// # Errors
    ///
    /// Returns `VaultError` if the store rejects the credentials or cannot be
    /// reached. The caller treats this as fatal.
    fn authenticate(&mut self) -> Result<()>;

    /// Read every field stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::EmptyPath` if the path exists but holds no
    /// fields, or another `VaultError` if the read fails.
    fn read_secret(&mut self, path: &str) -> Result<SecretRecord>;
}
