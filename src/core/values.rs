//! Values file substitution.
//!
//! Reads a file, runs one substitution pass over it and writes it back in
//! place only when a reference was replaced.

use std::path::Path;

use tracing::debug;

use crate::core::cache::SecretCache;
use crate::core::store::SecretStore;
use crate::core::substitute;
use crate::error::{Error, Result};

/// Substitute references in the file at `path`.
///
/// Each file gets its own cache. The file is rewritten only if something
/// changed; its permission bits are left as they were.
///
/// # Returns
///
/// Whether the file was rewritten.
///
/// # Errors
///
/// Returns `Error::File` if the file cannot be read or written, or any
/// error from the substitution pass. The file is untouched in that case.
pub fn substitute_file<S>(path: &Path, store: &mut S) -> Result<bool>
where
    S: SecretStore + ?Sized,
{
    let file_error = |source| Error::File {
        path: path.to_path_buf(),
        source,
    };

    debug!(path = %path.display(), "scanning values file");
    let contents = std::fs::read(path).map_err(file_error)?;

    let mut cache = SecretCache::new();
    let result = substitute::resolve_and_replace(&contents, store, &mut cache)?;

    for skipped in &result.skipped {
        debug!(
            path = %path.display(),
            token = %skipped.token,
            reason = %skipped.reason,
            "reference left unchanged"
        );
    }

    if !result.changed {
        return Ok(false);
    }

    std::fs::write(path, &result.output).map_err(file_error)?;
    debug!(path = %path.display(), "values file rewritten");
    Ok(true)
}
