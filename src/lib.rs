//! helm-vault - resolve HashiCorp Vault references in Helm values files.
//!
//! Sits in front of `helm` (typically inside an Argo CD repo server),
//! replaces `<vault:PATH#KEY>` references in values files with secrets read
//! from Vault, then runs the real helm binary with the untouched arguments.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # The shim around the wrapped command
//! │   ├── mod           # Environment settings and orchestration
//! │   ├── args          # Values file discovery
//! │   ├── run           # Wrapped command execution
//! │   └── output        # Error and hint printing
//! └── core/             # Core library components
//!     ├── constants     # Environment variable names and defaults
//!     ├── reference     # <vault:PATH#KEY|TRANSFORM> grammar
//!     ├── transform     # Value transforms (b64enc)
//!     ├── store/        # Secret store backends
//!     │   ├── mod       # SecretStore trait
//!     │   ├── vault     # Vault HTTP client
//!     │   └── memory    # In-memory store
//!     ├── cache         # Per-pass secret cache
//!     ├── substitute    # Substitution engine
//!     └── values        # Values file rewrite
//! ```
//!
//! # Example
//!
//! ```
//! use helm_vault::core::cache::SecretCache;
//! use helm_vault::core::store::MemoryStore;
//! use helm_vault::core::substitute::resolve_and_replace;
//!
//! let mut store = MemoryStore::new()
//!     .with_secret("secret/data/app", serde_json::json!({ "password": "s3cr3t" }));
//! let result = resolve_and_replace(
//!     b"password: <vault:secret/data/app#password|b64enc>",
//!     &mut store,
//!     &mut SecretCache::new(),
//! )
//! .unwrap();
//!
//! assert_eq!(result.output, b"password: czNjcjN0");
//! assert!(result.changed);
//! ```

pub mod cli;
pub mod core;
pub mod error;
