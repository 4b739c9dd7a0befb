//! Values file discovery.
//!
//! Finds the files helm will read as values from its own argument vector.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use crate::core::constants::{VALUES_FLAG, VALUES_FLAG_SHORT};

/// Collect values files named in `args`.
///
/// Accepts `--values FILE`, `--values=FILE`, `-f FILE`, `-fFILE` and
/// `-f=FILE`. Comma-separated lists are split. Stdin (`-`) and remote URLs
/// are skipped since there is nothing local to rewrite.
pub fn values_files(args: &[OsString]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let Some(text) = arg.to_str() else {
            continue;
        };

        if text == VALUES_FLAG || text == VALUES_FLAG_SHORT {
            match iter.next() {
                Some(value) => push_values(&mut files, value),
                None => break,
            }
        } else if let Some(value) = text
            .strip_prefix(VALUES_FLAG)
            .and_then(|rest| rest.strip_prefix('='))
        {
            push_values(&mut files, OsStr::new(value));
        } else if let Some(value) = text.strip_prefix(VALUES_FLAG_SHORT) {
            let value = value.strip_prefix('=').unwrap_or(value);
            push_values(&mut files, OsStr::new(value));
        }
    }

    files
}

fn push_values(files: &mut Vec<PathBuf>, value: &OsStr) {
    match value.to_str() {
        Some(text) => files.extend(
            text.split(',')
                .filter(|v| !v.is_empty() && *v != "-" && !v.contains("://"))
                .map(PathBuf::from),
        ),
        None => files.push(PathBuf::from(value)),
    }
}
