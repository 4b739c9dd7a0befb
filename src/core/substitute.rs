//! Substitution engine.
//!
//! Scans a buffer for secret references and builds a new buffer with every
//! resolvable reference replaced by its secret value. The input is never
//! modified; errors come back to the caller before anything is written.
//!
//! A reference that cannot be resolved (malformed body, unknown key, `null`
//! or non-string value) stays in the output verbatim and is reported in
//! [`Substitution::skipped`].

use std::fmt;

use serde_json::Value;
use tracing::{debug, trace};

use crate::core::cache::SecretCache;
use crate::core::reference::{self, Reference};
use crate::core::store::SecretStore;
use crate::core::transform::Transform;
use crate::error::Result;

/// Result of one substitution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// Rewritten buffer.
    pub output: Vec<u8>,
    /// At least one reference was replaced.
    pub changed: bool,
    /// References left in place, in buffer order.
    pub skipped: Vec<Skipped>,
}

/// A reference that was left in the output unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    /// The token as it appears in the buffer.
    pub token: String,
    /// Why it was not replaced.
    pub reason: SkipReason,
}

/// Why a reference was not replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Token looked like a reference but its body did not parse.
    Malformed,
    /// The secret has no such key, or its value is `null`.
    MissingKey,
    /// The value is a number, boolean, list or object.
    NotAString,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Malformed => "malformed reference",
            Self::MissingKey => "key not found",
            Self::NotAString => "value is not a string",
        })
    }
}

enum Outcome {
    Replaced(String),
    Skipped(SkipReason),
}

/// Replace every resolvable reference in `input`.
///
/// References are resolved left to right. Each path is read from `store` at
/// most once per `cache`; the store is authenticated lazily before the first
/// read, so a buffer without references never touches it.
///
/// # Errors
///
/// Returns the first authentication, read or `UnsupportedTransform` error.
/// No partial output is returned in that case.
pub fn resolve_and_replace<S>(
    input: &[u8],
    store: &mut S,
    cache: &mut SecretCache,
) -> Result<Substitution>
where
    S: SecretStore + ?Sized,
{
    let mut output = Vec::with_capacity(input.len());
    let mut skipped = Vec::new();
    let mut changed = false;
    let mut last = 0;

    for span in reference::spans(input) {
        output.extend_from_slice(&input[last..span.range.start]);
        last = span.range.end;

        match resolve(span.text, store, cache)? {
            Outcome::Replaced(value) => {
                output.extend_from_slice(value.as_bytes());
                changed = true;
            }
            Outcome::Skipped(reason) => {
                output.extend_from_slice(span.text);
                skipped.push(Skipped {
                    token: String::from_utf8_lossy(span.text).into_owned(),
                    reason,
                });
            }
        }
    }
    output.extend_from_slice(&input[last..]);

    debug!(changed, skipped = skipped.len(), "substitution pass done");
    Ok(Substitution {
        output,
        changed,
        skipped,
    })
}

fn resolve<S>(token: &[u8], store: &mut S, cache: &mut SecretCache) -> Result<Outcome>
where
    S: SecretStore + ?Sized,
{
    let Some(reference) = std::str::from_utf8(token).ok().and_then(Reference::parse) else {
        return Ok(Outcome::Skipped(SkipReason::Malformed));
    };

    let record = cache.get_or_fetch(reference.path, store)?;
    let value = match record.get(reference.key) {
        Some(Value::String(value)) => value,
        None | Some(Value::Null) => return Ok(Outcome::Skipped(SkipReason::MissingKey)),
        Some(_) => return Ok(Outcome::Skipped(SkipReason::NotAString)),
    };

    let resolved = match reference.transform {
        Some(name) => name.parse::<Transform>()?.apply(value),
        None => value.clone(),
    };

    trace!(
        path = reference.path,
        key = reference.key,
        transform = reference.transform,
        "reference resolved"
    );
    Ok(Outcome::Replaced(resolved))
}
